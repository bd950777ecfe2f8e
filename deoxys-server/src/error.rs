//! HTTP error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use deoxys_core::AiError;
use serde_json::json;

/// Errors returned to HTTP clients as `{"error": "..."}`
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Missing prompt.")]
    MissingPrompt,

    /// The image upstream answered with a non-OK status
    #[error("Image generation failed.")]
    ImageFailed,

    /// Request body is not valid JSON for the endpoint
    #[error("{0}")]
    Malformed(#[from] serde_json::Error),

    #[error("{0}")]
    Internal(String),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::MissingPrompt => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AiError> for ServerError {
    fn from(err: AiError) -> Self {
        match err {
            AiError::InvalidRequest(_) => ServerError::MissingPrompt,
            AiError::UpstreamStatus { .. } => ServerError::ImageFailed,
            other => ServerError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("request failed: {}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
