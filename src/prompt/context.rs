use crate::catalog::RequestType;
use crate::config::ScribeConfig;
use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Scale framing for a generated place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaSize {
    Small,
    Large,
}

impl AreaSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            AreaSize::Small => "small",
            AreaSize::Large => "large",
        }
    }

    /// Catalog entry describing a place of this size.
    pub fn request_type(&self) -> RequestType {
        match self {
            AreaSize::Small => RequestType::DiscoverPlace,
            AreaSize::Large => RequestType::LocationOverview,
        }
    }
}

impl fmt::Display for AreaSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AreaSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "small" => Ok(AreaSize::Small),
            "large" => Ok(AreaSize::Large),
            other => Err(Error::invalid_parameter_with_context(
                format!("unsupported area size '{}'", other),
                ErrorContext::new()
                    .with_field_path("area_size")
                    .with_details("expected one of: small, large"),
            )),
        }
    }
}

/// Inputs for one generation call. Built fresh per call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationContext {
    system_context: String,
    world_context: String,
    seed_text: Option<String>,
    area_size: Option<AreaSize>,
}

impl GenerationContext {
    pub fn new(system_context: impl Into<String>, world_context: impl Into<String>) -> Self {
        Self {
            system_context: system_context.into(),
            world_context: world_context.into(),
            seed_text: None,
            area_size: None,
        }
    }

    pub fn from_config(config: &ScribeConfig) -> Self {
        Self::new(
            config.general_system_context.clone(),
            config.general_world_context.clone(),
        )
    }

    pub fn with_seed_text(mut self, seed: impl Into<String>) -> Self {
        self.seed_text = Some(seed.into());
        self
    }

    pub fn with_area_size(mut self, size: AreaSize) -> Self {
        self.area_size = Some(size);
        self
    }

    pub fn system_context(&self) -> &str {
        &self.system_context
    }

    pub fn world_context(&self) -> &str {
        &self.world_context
    }

    /// Seed text, treating blank input as absent.
    pub fn seed_text(&self) -> Option<&str> {
        self.seed_text
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn area_size(&self) -> Option<AreaSize> {
        self.area_size
    }
}
