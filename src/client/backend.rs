use crate::types::Message;
use crate::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// A text-generation backend.
///
/// One call is one attempt: implementations must not retry or cache, and must
/// return the raw text of the single top completion.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn complete(&self, messages: &[Message]) -> Result<String>;
}

#[async_trait]
impl<T: GenerationBackend + ?Sized> GenerationBackend for Arc<T> {
    async fn complete(&self, messages: &[Message]) -> Result<String> {
        (**self).complete(messages).await
    }
}

#[async_trait]
impl<T: GenerationBackend + ?Sized> GenerationBackend for Box<T> {
    async fn complete(&self, messages: &[Message]) -> Result<String> {
        (**self).complete(messages).await
    }
}
