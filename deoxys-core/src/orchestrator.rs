//! Fallback orchestrator.
//!
//! Providers are tried strictly in registration order; the first non-empty
//! answer wins. When every provider comes back empty the orchestrator builds
//! a local degraded response, so callers always get text back.

use crate::layer::Layer;
use crate::prompt::build_prompt;
use crate::provider::TextProvider;
use crate::simplify::simplify;
use crate::types::*;
use std::sync::Arc;

/// Type-erased provider that can be shared across threads
type BoxedProvider = Arc<dyn TextProvider>;

/// Instructional text returned when no provider answers a conversation
pub const DEFAULT_DEMO_MESSAGE: &str = "Demo mode is on.\n\n- Set HF_ACCESS_TOKEN (and optional HF_CHAT_MODEL: mistralai/Mistral-7B-Instruct-v0.2).\n- Pollinations text also tried.";

/// Builder for an [`Orchestrator`].
///
/// # Example
///
/// ```ignore
/// let orchestrator = Orchestrator::builder()
///     .provider(huggingface)
///     .provider_with_layer(pollinations, LoggingLayer::new())
///     .finish();
/// ```
#[derive(Default)]
pub struct OrchestratorBuilder {
    providers: Vec<BoxedProvider>,
    demo_message: Option<String>,
}

impl OrchestratorBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a provider (lowest priority so far)
    pub fn provider<P: TextProvider>(mut self, provider: P) -> Self {
        self.providers.push(Arc::new(provider));
        self
    }

    /// Wrap a provider with a layer, then append it
    pub fn provider_with_layer<P, L>(self, provider: P, layer: L) -> Self
    where
        P: TextProvider,
        L: Layer<P>,
    {
        self.provider(layer.layer(provider))
    }

    /// Override the instructional demo message
    pub fn demo_message(mut self, message: impl Into<String>) -> Self {
        self.demo_message = Some(message.into());
        self
    }

    /// Finish building
    pub fn finish(self) -> Orchestrator {
        let names: Vec<String> = self
            .providers
            .iter()
            .map(|p| p.info().name.clone())
            .collect();
        tracing::info!("Orchestrator initialized with providers: [{}]", names.join(", "));

        Orchestrator {
            providers: self.providers,
            demo_message: self
                .demo_message
                .unwrap_or_else(|| DEFAULT_DEMO_MESSAGE.to_string()),
        }
    }
}

/// Sequential multi-provider orchestrator.
pub struct Orchestrator {
    providers: Vec<BoxedProvider>,
    demo_message: String,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("providers", &self.providers)
            .finish()
    }
}

impl Orchestrator {
    /// Create a new builder
    pub fn builder() -> OrchestratorBuilder {
        OrchestratorBuilder::new()
    }

    /// Information about the registered providers, in priority order
    pub fn providers(&self) -> Vec<Arc<ProviderInfo>> {
        self.providers.iter().map(|p| p.info()).collect()
    }

    /// Produce a best-effort answer for a chat request.
    pub async fn orchestrate(&self, req: &ChatRequest) -> OrchestrationOutcome {
        let ctx = RequestContext::new(req.simplify_mode);
        let prompt = build_prompt(req);

        tracing::debug!(
            "[{}] orchestrating: simplify={}, messages={}, providers={}",
            ctx.request_id,
            ctx.simplify_mode,
            req.messages.len(),
            self.providers.len()
        );

        for provider in &self.providers {
            if let Some(result) = provider.try_generate(&prompt).await {
                tracing::info!(
                    "[{}] Chat provider: {}",
                    ctx.request_id,
                    result.provider_id
                );
                return result.into();
            }
        }

        let reason = self.exhaustion_reason();
        let text = if req.simplify_mode {
            simplify(req.simplify_input())
        } else {
            self.demo_message.clone()
        };

        tracing::warn!("[{}] Chat provider: demo | reason: {}", ctx.request_id, reason);
        OrchestrationOutcome::Demo { text, reason }
    }

    fn exhaustion_reason(&self) -> String {
        if self.providers.is_empty() {
            return "No provider responded. No providers are configured.".to_string();
        }
        let names: Vec<String> = self
            .providers
            .iter()
            .map(|p| p.info().display_name())
            .collect();
        format!("No provider responded. Checked {}.", names.join(" then "))
    }
}
