//! # session-scribe
//!
//! Structured narrative generation for tabletop role-play sessions.
//!
//! ## Overview
//!
//! The crate turns a content request (a new NPC, a place seen up close, a region
//! seen from afar) into a prompt, submits it to a chat-completions backend in JSON
//! mode, and checks the reply for a fixed set of fields before handing a typed
//! record back to the caller. A dice-roll yes/no oracle rounds out the session
//! tools.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use session_scribe::{GenerationPipeline, ScribeConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> session_scribe::Result<()> {
//!     let config = Arc::new(ScribeConfig::load(None)?);
//!     let pipeline = GenerationPipeline::from_config(config)?;
//!
//!     let (name, looks, personality) = pipeline.create_npc().await?.into_parts();
//!     println!("{name}: {looks} / {personality}");
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`catalog`] | Request types, prompt templates and required-field schemas |
//! | [`prompt`] | Renders templates into system/user messages and accent-image prompts |
//! | [`client`] | Backend trait and the chat-completions client |
//! | [`structured`] | JSON mode and reply validation/extraction |
//! | [`pipeline`] | `create_npc` / `create_setting` facade |
//! | [`config`] | File + environment configuration |
//! | [`oracle`] | Yes/no dice oracle |
//! | [`types`] | Chat message types |

pub mod catalog;
pub mod client;
pub mod config;
pub mod oracle;
pub mod pipeline;
pub mod prompt;
pub mod structured;
pub mod types;

pub use catalog::{RequestType, SchemaSpec};
pub use client::{GenerationBackend, OpenAiChatClient};
pub use config::ScribeConfig;
pub use pipeline::{GenerationPipeline, NpcProfile, PlaceProfile};
pub use prompt::{AreaSize, GenerationContext, ImagePrompt};
pub use structured::ExtractedRecord;
pub use types::{Message, MessageRole};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext, ErrorKind};
