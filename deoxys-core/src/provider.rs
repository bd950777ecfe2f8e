//! Text provider trait.

use crate::error::AiError;
use crate::types::*;
use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

/// Core provider trait for text generation services.
///
/// Adapters implement [`generate`](TextProvider::generate) and report every
/// failure as an [`AiError`]. The orchestrator only ever calls
/// [`try_generate`](TextProvider::try_generate), which logs the failure and
/// collapses it into "no result".
#[async_trait]
pub trait TextProvider: Send + Sync + Debug + 'static {
    /// Get provider information
    fn info(&self) -> Arc<ProviderInfo>;

    /// Generate text for a flattened prompt
    async fn generate(&self, prompt: &str) -> Result<ProviderResult, AiError>;

    /// Generate text, turning any failure into `None`
    async fn try_generate(&self, prompt: &str) -> Option<ProviderResult> {
        match self.generate(prompt).await {
            Ok(result) => Some(result),
            Err(e) => {
                let info = self.info();
                match &e {
                    AiError::Configuration(msg) => {
                        tracing::debug!("{} not configured, skipping: {}", info.id, msg);
                    }
                    AiError::Unauthorized(msg) => {
                        // Falls through to the next provider, but an operator
                        // has to fix the credentials.
                        tracing::error!(
                            "{} rejected the configured credentials, falling through: {}",
                            info.id,
                            msg
                        );
                    }
                    _ => {
                        tracing::warn!("{} produced no result: {}", info.id, e);
                    }
                }
                None
            }
        }
    }
}

#[async_trait]
impl<P: TextProvider + ?Sized> TextProvider for Arc<P> {
    fn info(&self) -> Arc<ProviderInfo> {
        (**self).info()
    }

    async fn generate(&self, prompt: &str) -> Result<ProviderResult, AiError> {
        (**self).generate(prompt).await
    }
}
