//! # Deoxys Providers
//!
//! Upstream adapters for Deoxys.
//!
//! - [`HuggingFaceProvider`]: configurable, token-gated inference API with
//!   model fallback and warm-up retry (priority 1)
//! - [`PollinationsProvider`]: anonymous public text endpoint (priority 2)
//! - [`PollinationsImageProvider`]: image generation proxy

pub mod huggingface;
pub mod image;
pub mod pollinations;

// Re-exports
pub use huggingface::{HuggingFaceBuilder, HuggingFaceProvider};
pub use image::{GeneratedImage, PollinationsImageBuilder, PollinationsImageProvider};
pub use pollinations::{PollinationsBuilder, PollinationsProvider};
