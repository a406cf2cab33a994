//! Pipeline facade: the entry points that sequence assembly, generation and extraction.
//!
//! ```text
//! create_npc / create_setting
//!        │
//!        ▼
//! prompt::assemble ──► GenerationBackend::complete ──► ResponseValidator::extract
//!   (messages)             (one network call)             (ExtractedRecord)
//! ```
//!
//! Every error raised along the way reaches the caller unchanged. Nothing is
//! retried, cached or partially returned.
//!
//! ## Example
//!
//! ```rust,no_run
//! use session_scribe::config::ScribeConfig;
//! use session_scribe::pipeline::GenerationPipeline;
//! use std::sync::Arc;
//!
//! # async fn run() -> session_scribe::Result<()> {
//! let config = Arc::new(ScribeConfig::load(None)?);
//! let pipeline = GenerationPipeline::from_config(config)?;
//!
//! let npc = pipeline.create_npc().await?;
//! let tavern = pipeline
//!     .create_setting("The Rusty Flask", "a dim tavern", "small")
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod profiles;

pub use profiles::{NpcProfile, PlaceProfile};

use crate::catalog::RequestType;
use crate::client::{GenerationBackend, OpenAiChatClient};
use crate::config::ScribeConfig;
use crate::prompt::{self, AreaSize, GenerationContext};
use crate::structured::{ExtractedRecord, ResponseValidator};
use crate::{Error, Result};
use std::sync::Arc;
use tracing::{info, warn};

/// Stateless facade over one backend. Safe to share across concurrent requests.
pub struct GenerationPipeline<B> {
    config: Arc<ScribeConfig>,
    backend: B,
    validator: ResponseValidator,
}

impl GenerationPipeline<OpenAiChatClient> {
    /// Pipeline backed by the chat-completions client described in `config`.
    pub fn from_config(config: Arc<ScribeConfig>) -> Result<Self> {
        let backend = OpenAiChatClient::from_config(&config)?;
        Ok(Self::new(config, backend))
    }
}

impl<B: GenerationBackend> GenerationPipeline<B> {
    pub fn new(config: Arc<ScribeConfig>, backend: B) -> Self {
        Self {
            config,
            backend,
            validator: ResponseValidator::new(),
        }
    }

    pub fn config(&self) -> &ScribeConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Fresh context for one call, built from the configuration.
    pub fn context(&self) -> GenerationContext {
        GenerationContext::from_config(&self.config)
    }

    /// Assemble, submit and validate one request.
    ///
    /// Unsupported request types and bad context fail before the backend is called.
    pub async fn generate(
        &self,
        request_type: RequestType,
        ctx: &GenerationContext,
    ) -> Result<ExtractedRecord> {
        let schema = request_type.schema()?;
        let messages = prompt::assemble(request_type, ctx)?;

        info!(request_type = %request_type, "generating structured content");
        let raw = self.backend.complete(&messages).await.map_err(|e| {
            warn!(request_type = %request_type, error = %e, "generation failed");
            e
        })?;

        self.validator.extract(&raw, &schema).map_err(|e| {
            warn!(request_type = %request_type, error = %e, "backend reply rejected");
            e
        })
    }

    /// Generate an ordinary, non-heroic NPC.
    pub async fn create_npc(&self) -> Result<NpcProfile> {
        let mut record = self
            .generate(RequestType::MeetCharacter, &self.context())
            .await?;
        Ok(NpcProfile {
            character_name: record.take_required("character_name")?,
            physical_description: record.take_required("physical_description")?,
            personality: record.take_required("personality")?,
        })
    }

    /// Expand a short place description into a long one with game-master secrets.
    ///
    /// `area_size` must be `small` or `large`. The returned `place_name` is the
    /// caller's, whatever the backend may have answered for that key.
    pub async fn create_setting(
        &self,
        place_name: &str,
        short_description: &str,
        area_size: &str,
    ) -> Result<PlaceProfile> {
        let size: AreaSize = area_size.parse()?;
        if place_name.trim().is_empty() {
            return Err(Error::invalid_parameter(
                "place_name",
                "place name must not be empty",
            ));
        }
        if short_description.trim().is_empty() {
            return Err(Error::invalid_parameter(
                "short_description",
                "short description must not be empty",
            ));
        }

        let ctx = self
            .context()
            .with_seed_text(short_description)
            .with_area_size(size);
        let mut record = self.generate(size.request_type(), &ctx).await?;
        Ok(PlaceProfile {
            place_name: place_name.to_string(),
            long_description: record.take_required("long_description")?,
            secrets: record.take_required("secrets")?,
        })
    }
}
