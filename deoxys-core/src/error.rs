//! Error types for Deoxys provider operations.

/// The main error type for provider operations.
///
/// None of these ever reach an HTTP client directly: the orchestrator turns
/// every provider failure into "try the next provider", and finally into a
/// demo response.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// Network-related errors
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The upstream rejected our credentials (HTTP 401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The upstream model is still loading (HTTP 503)
    #[error("Model warming up: {0}")]
    WarmingUp(String),

    /// Model not found errors (HTTP 404)
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// Any other non-OK upstream status
    #[error("Upstream returned {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    /// The upstream answered OK but no usable text could be extracted
    #[error("Empty response from {0}")]
    EmptyResponse(String),

    /// Every candidate of an adapter was tried without success
    #[error("No result from {0}")]
    NoResult(String),

    /// Timeout errors
    #[error("Request timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// Invalid request errors
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl AiError {
    /// Create an unauthorized error
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    /// Create a warming-up error
    pub fn warming_up(model: impl Into<String>) -> Self {
        Self::WarmingUp(model.into())
    }

    /// Create a model not found error
    pub fn model_not_found(model: impl Into<String>) -> Self {
        Self::ModelNotFound(model.into())
    }

    /// Create an upstream status error
    pub fn upstream_status(status: u16, body: impl Into<String>) -> Self {
        Self::UpstreamStatus {
            status,
            body: body.into(),
        }
    }

    /// Create an empty response error
    pub fn empty_response(source: impl Into<String>) -> Self {
        Self::EmptyResponse(source.into())
    }

    /// Create a no-result error
    pub fn no_result(provider: impl Into<String>) -> Self {
        Self::NoResult(provider.into())
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Check if this error is transient and worth retrying against the same target
    pub fn is_retryable(&self) -> bool {
        matches!(self, AiError::WarmingUp(_))
    }

    /// Check if this error must abort the whole adapter rather than advancing
    /// to the next candidate model
    pub fn is_fatal(&self) -> bool {
        matches!(self, AiError::Unauthorized(_))
    }

    /// Check if this error means the adapter is simply not set up
    pub fn is_not_configured(&self) -> bool {
        matches!(self, AiError::Configuration(_))
    }
}
