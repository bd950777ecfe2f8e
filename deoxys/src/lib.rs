//! # Deoxys
//!
//! Dyslexia-friendly chat backend.
//!
//! Deoxys answers chat requests by trying a list of text-generation
//! providers in priority order. The first non-empty answer wins; when every
//! provider fails it degrades to a local response so the caller always gets
//! readable text back.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! deoxys = { version = "0.1", features = ["providers", "layers"] }
//! ```
//!
//! ```ignore
//! use deoxys::prelude::*;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let huggingface = HuggingFaceProvider::builder()
//!     .maybe_api_key(std::env::var("HF_ACCESS_TOKEN").ok())
//!     .build()?;
//! let pollinations = PollinationsProvider::new()?;
//!
//! let orchestrator = Orchestrator::builder()
//!     .provider_with_layer(huggingface, LoggingLayer::new())
//!     .provider_with_layer(pollinations, LoggingLayer::new())
//!     .finish();
//!
//! let outcome = orchestrator
//!     .orchestrate(&ChatRequest::new(vec![ChatMessage::user("What is a noun?")]))
//!     .await;
//! println!("{} via {}", outcome.text(), outcome.provider());
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: `providers` and `layers`
//! - `providers`: Hugging Face and Pollinations adapters, image proxy
//! - `layers`: built-in provider layers (logging)
//! - `access`: preferences, speech, voice and brightness helpers
//! - `full`: all of the above

// Re-export core types and traits
pub use deoxys_core::*;

// Re-export providers under `provider` module
#[cfg(feature = "deoxys-provider")]
pub mod provider {
    //! Upstream adapters.
    pub use deoxys_provider::*;
}

// Re-export layers under `layer` module
#[cfg(feature = "deoxys-layer")]
pub mod layer {
    //! Built-in provider layers.
    pub use deoxys_layer::*;
}

#[cfg(feature = "deoxys-access")]
pub mod access {
    //! Accessibility collaborators.
    pub use deoxys_access::*;
}

/// Prelude module for convenient imports
pub mod prelude {
    //! Prelude module containing the most commonly used types and traits.
    //!
    //! ```
    //! use deoxys::prelude::*;
    //! ```

    pub use crate::{
        AiError, ChatMessage, ChatRequest, Layer, OrchestrationOutcome, Orchestrator,
        ProviderResult, Result, RetryPolicy, Role, TextProvider, TextProviderExt,
    };

    #[cfg(feature = "deoxys-provider")]
    pub use crate::provider::*;

    #[cfg(feature = "deoxys-layer")]
    pub use crate::layer::*;
}
