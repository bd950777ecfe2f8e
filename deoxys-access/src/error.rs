//! Error types for accessibility helpers.

/// Errors raised by the accessibility collaborators.
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    /// Preference file could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Preference file could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The environment lacks a required capability
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// The speech engine reported a failure
    #[error("Speech recognition error: {0}")]
    Recognition(String),
}

impl AccessError {
    /// Create an unsupported error
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }

    /// Create a recognition error
    pub fn recognition(msg: impl Into<String>) -> Self {
        Self::Recognition(msg.into())
    }
}
