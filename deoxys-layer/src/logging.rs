//! Logging layer for provider calls.

use deoxys_core::error::AiError;
use deoxys_core::impl_layered_provider;
use deoxys_core::layer::{Layer, LayeredProvider};
use deoxys_core::provider::TextProvider;
use deoxys_core::types::*;
use async_trait::async_trait;

/// Logging layer that records every provider call.
#[derive(Debug, Clone)]
pub struct LoggingLayer {
    prefix: String,
}

impl LoggingLayer {
    /// Create a new logging layer
    pub fn new() -> Self {
        Self {
            prefix: "[Deoxys]".to_string(),
        }
    }

    /// Create a logging layer with custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for LoggingLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: TextProvider> Layer<P> for LoggingLayer {
    type LayeredProvider = LoggingProvider<P>;

    fn layer(&self, inner: P) -> Self::LayeredProvider {
        LoggingProvider {
            inner,
            prefix: self.prefix.clone(),
        }
    }
}

/// Provider wrapped with logging
#[derive(Debug)]
pub struct LoggingProvider<P> {
    inner: P,
    prefix: String,
}

impl<P> LoggingProvider<P> {
    /// The prefix prepended to every log line
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

#[async_trait]
impl<P: TextProvider> LayeredProvider for LoggingProvider<P> {
    type Inner = P;

    fn inner(&self) -> &Self::Inner {
        &self.inner
    }

    async fn layered_generate(&self, prompt: &str) -> Result<ProviderResult, AiError> {
        let info = self.inner.info();
        tracing::debug!(
            "{} {} generate request: prompt_chars={}",
            self.prefix,
            info.id,
            prompt.chars().count()
        );

        let start = std::time::Instant::now();
        let result = self.inner.generate(prompt).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(response) => {
                tracing::info!(
                    "{} {} generate success: provider={}, chars={}, elapsed={:?}",
                    self.prefix,
                    info.id,
                    response.provider_id,
                    response.text.chars().count(),
                    elapsed
                );
            }
            Err(e) if e.is_not_configured() => {
                tracing::debug!(
                    "{} {} skipped (not configured), elapsed={:?}",
                    self.prefix,
                    info.id,
                    elapsed
                );
            }
            Err(e) => {
                tracing::warn!(
                    "{} {} generate error: {}, elapsed={:?}",
                    self.prefix,
                    info.id,
                    e,
                    elapsed
                );
            }
        }

        result
    }
}

impl_layered_provider!(LoggingProvider);
