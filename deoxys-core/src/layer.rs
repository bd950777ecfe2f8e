//! Layer trait and abstractions.
//!
//! Layers wrap a provider with a cross-cutting concern (logging, deadlines)
//! and yield another provider, so they compose freely before the provider is
//! handed to the orchestrator.

use crate::error::AiError;
use crate::provider::TextProvider;
use crate::types::*;
use async_trait::async_trait;
use std::sync::Arc;

/// Layer trait for wrapping providers.
pub trait Layer<P: TextProvider> {
    /// The type of the layered provider
    type LayeredProvider: TextProvider;

    /// Wrap the inner provider with this layer
    fn layer(&self, inner: P) -> Self::LayeredProvider;
}

/// Helper trait for layered providers.
///
/// Provides forwarding defaults; implementers only override what they
/// intercept and then use [`impl_layered_provider!`](crate::impl_layered_provider).
#[async_trait]
pub trait LayeredProvider: Sized + Send + Sync {
    /// The inner provider type
    type Inner: TextProvider;

    /// Get a reference to the inner provider
    fn inner(&self) -> &Self::Inner;

    /// Default implementation for info - forwards to inner
    fn layered_info(&self) -> Arc<ProviderInfo> {
        self.inner().info()
    }

    /// Default implementation for generate - forwards to inner
    async fn layered_generate(&self, prompt: &str) -> Result<ProviderResult, AiError> {
        self.inner().generate(prompt).await
    }
}

/// Extension trait to apply a layer with method syntax.
pub trait TextProviderExt: TextProvider + Sized {
    /// Wrap `self` with `layer`
    fn layer<L: Layer<Self>>(self, layer: L) -> L::LayeredProvider {
        layer.layer(self)
    }
}

impl<P: TextProvider> TextProviderExt for P {}

/// Macro to implement TextProvider by forwarding to LayeredProvider methods.
#[macro_export]
macro_rules! impl_layered_provider {
    ($type:ident) => {
        #[async_trait::async_trait]
        impl<P: $crate::provider::TextProvider> $crate::provider::TextProvider for $type<P> {
            fn info(&self) -> std::sync::Arc<$crate::types::ProviderInfo> {
                $crate::layer::LayeredProvider::layered_info(self)
            }

            async fn generate(
                &self,
                prompt: &str,
            ) -> Result<$crate::types::ProviderResult, $crate::error::AiError> {
                $crate::layer::LayeredProvider::layered_generate(self, prompt).await
            }
        }
    };
}
