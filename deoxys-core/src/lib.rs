//! # Deoxys Core
//!
//! Core abstractions for the Deoxys dyslexia-accessibility backend.
//!
//! This crate provides the [`TextProvider`] contract, composable layers, the
//! shared timeout and retry helpers, and the [`Orchestrator`] that tries
//! providers in priority order before degrading to a local response.

pub mod error;
pub mod layer;
pub mod orchestrator;
pub mod prompt;
pub mod provider;
pub mod retry;
pub mod simplify;
pub mod timeout;
pub mod types;

// Re-exports
pub use error::AiError;
pub use layer::{Layer, LayeredProvider, TextProviderExt};
pub use orchestrator::{Orchestrator, OrchestratorBuilder};
pub use provider::TextProvider;
pub use retry::RetryPolicy;
pub use timeout::{with_timeout, DEFAULT_TIMEOUT};
pub use types::*;

/// Result type alias for provider operations
pub type Result<T> = std::result::Result<T, AiError>;
