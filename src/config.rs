//! Process configuration loaded from a JSON or YAML file with environment overlays.
//!
//! Resolution order for the file: explicit path, `SCRIBE_CONFIG`, `config.json`.
//! Environment overrides applied after parsing:
//!
//! - `OPENAI_API_KEY` replaces the file's API key
//! - `SCRIBE_BASE_URL` replaces `generation.base_url`
//! - `SCRIBE_HTTP_TIMEOUT_SECS` replaces `generation.timeout_secs`

use crate::structured::JsonMode;
use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "config.json";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Immutable configuration shared by every pipeline call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScribeConfig {
    /// Narrative framing placed in the system message.
    #[serde(default, alias = "general_sytem_context")]
    pub general_system_context: String,
    /// World description placed at the start of every task instruction.
    #[serde(default)]
    pub general_world_context: String,
    #[serde(default, alias = "OPENAI_API_KEY", skip_serializing)]
    pub openai_api_key: Option<String>,
    /// Art direction for accent images, see [`crate::prompt::image_prompt`].
    #[serde(default)]
    pub image_style: Option<String>,
    #[serde(default = "default_image_size")]
    pub image_size: String,
    #[serde(default)]
    pub image_context: Option<String>,
    #[serde(default)]
    pub generation: GenerationSettings,
}

fn default_image_size() -> String {
    "512x512".to_string()
}

/// Backend endpoint and sampling parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
    pub timeout_secs: u64,
    pub json_mode: JsonMode,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: 1.0,
            max_tokens: 700,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            timeout_secs: 60,
            json_mode: JsonMode::Json,
        }
    }
}

impl Default for ScribeConfig {
    fn default() -> Self {
        Self {
            general_system_context: String::new(),
            general_world_context: String::new(),
            openai_api_key: None,
            image_style: None,
            image_size: default_image_size(),
            image_context: None,
            generation: GenerationSettings::default(),
        }
    }
}

impl ScribeConfig {
    /// Resolve, parse, overlay the environment and validate.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = Self::resolve_path(explicit);
        tracing::debug!(path = %path.display(), "loading configuration");
        Self::from_path(&path)?.with_env_overrides().validated()
    }

    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        if let Ok(path) = std::env::var("SCRIBE_CONFIG") {
            return PathBuf::from(path);
        }
        PathBuf::from(DEFAULT_CONFIG_FILE)
    }

    /// Parse a file, choosing the format by extension (`.yaml`/`.yml` or JSON).
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::configuration_with_context(
                format!("Failed to read config file: {}", e),
                ErrorContext::new()
                    .with_field_path(path.display().to_string())
                    .with_source("config_loader"),
            )
        })?;
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if ext == "yaml" || ext == "yml" {
            Self::from_yaml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| {
            Error::configuration_with_context(
                format!("Invalid JSON configuration: {}", e),
                ErrorContext::new().with_source("config_loader"),
            )
        })
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| {
            Error::configuration_with_context(
                format!("Invalid YAML configuration: {}", e),
                ErrorContext::new().with_source("config_loader"),
            )
        })
    }

    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup. Unparsable numbers are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(key) = lookup("OPENAI_API_KEY").filter(|k| !k.trim().is_empty()) {
            self.openai_api_key = Some(key);
        }
        if let Some(url) = lookup("SCRIBE_BASE_URL").filter(|u| !u.trim().is_empty()) {
            self.generation.base_url = url;
        }
        if let Some(secs) = lookup("SCRIBE_HTTP_TIMEOUT_SECS").and_then(|s| s.parse::<u64>().ok())
        {
            self.generation.timeout_secs = secs;
        }
        self
    }

    pub fn validated(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }

    /// Check sampling parameters against the ranges the backend accepts.
    pub fn validate(&self) -> Result<()> {
        let g = &self.generation;
        check_range("generation.temperature", g.temperature, 0.0, 2.0)?;
        check_range("generation.top_p", g.top_p, 0.0, 1.0)?;
        check_range("generation.frequency_penalty", g.frequency_penalty, -2.0, 2.0)?;
        check_range("generation.presence_penalty", g.presence_penalty, -2.0, 2.0)?;
        if g.max_tokens == 0 {
            return Err(Error::configuration_with_context(
                "max_tokens must be positive",
                ErrorContext::new().with_field_path("generation.max_tokens"),
            ));
        }
        if g.timeout_secs == 0 {
            return Err(Error::configuration_with_context(
                "timeout must be at least one second",
                ErrorContext::new().with_field_path("generation.timeout_secs"),
            ));
        }
        if g.model.trim().is_empty() {
            return Err(Error::configuration_with_context(
                "model must not be empty",
                ErrorContext::new().with_field_path("generation.model"),
            ));
        }
        Ok(())
    }

    pub fn api_key(&self) -> Option<&str> {
        self.openai_api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key().is_some()
    }
}

fn check_range(field: &str, value: f32, min: f32, max: f32) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(Error::configuration_with_context(
            format!("value {} out of range", value),
            ErrorContext::new()
                .with_field_path(field)
                .with_details(format!("expected {}..={}", min, max)),
        ))
    }
}
