//! Core data types shared across the pipeline.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Message`] | Rendered chat message with a role |
//! | [`MessageRole`] | `system` or `user` |

pub mod message;

pub use message::{Message, MessageRole};
