use crate::domain::model::{CompletionRequest, CompletionResponse};
use crate::utils::error::Result;
use async_trait::async_trait;

/// An external service that turns a conversation into generated text.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse>;
}

#[async_trait]
impl<'a, P: CompletionProvider + ?Sized> CompletionProvider for &'a P {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse> {
        (**self).complete(request).await
    }
}
