//! Generation client: submits assembled messages to the text-generation backend.
//!
//! The pipeline talks to the backend through [`GenerationBackend`] so tests and
//! alternative providers can stand in for [`OpenAiChatClient`].

mod backend;
mod openai;
pub mod sampling;

pub use backend::GenerationBackend;
pub use openai::{OpenAiChatClient, OpenAiChatClientBuilder};
pub use sampling::SamplingConfig;
