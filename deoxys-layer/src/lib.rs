//! # Deoxys Layers
//!
//! Built-in layers for Deoxys providers.
//!
//! Currently implemented layers:
//! - `LoggingLayer`: Logs provider calls with identity, outcome and timing
//!
//! ## Usage
//!
//! ```ignore
//! use deoxys_core::Orchestrator;
//! use deoxys_layer::LoggingLayer;
//!
//! let orchestrator = Orchestrator::builder()
//!     .provider_with_layer(huggingface, LoggingLayer::new())
//!     .provider_with_layer(pollinations, LoggingLayer::new())
//!     .finish();
//! ```

pub mod logging;

// Re-exports
pub use logging::{LoggingLayer, LoggingProvider};
