//! HTTP routes.

use crate::config::ServerConfig;
use crate::error::ServerError;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use deoxys_core::{
    AiError, ChatRequest, ImageSize, OrchestrationOutcome, Orchestrator, RetryPolicy,
    DEMO_PROVIDER_ID,
};
use deoxys_layer::LoggingLayer;
use deoxys_provider::{HuggingFaceProvider, PollinationsImageProvider, PollinationsProvider};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared handler state
#[derive(Debug, Clone)]
pub struct AppState {
    orchestrator: Arc<Orchestrator>,
    images: Arc<PollinationsImageProvider>,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator, images: PollinationsImageProvider) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            images: Arc::new(images),
        }
    }

    /// Wire the provider chain described by `config`
    pub fn from_config(config: &ServerConfig) -> Result<Self, AiError> {
        let client = reqwest::Client::builder().build()?;
        let timeout = config.request_timeout();

        let huggingface = HuggingFaceProvider::builder()
            .client(client.clone())
            .maybe_api_key(config.hf_access_token.clone())
            .model(config.hf_chat_model.clone().unwrap_or_default())
            .api_base(&config.huggingface_base_url)
            .timeout(timeout)
            .retry_policy(RetryPolicy::fixed(2, config.warmup_delay()))
            .build()?;
        if !huggingface.is_configured() {
            tracing::info!("HF_ACCESS_TOKEN not set, Hugging Face will be skipped");
        }

        let pollinations = PollinationsProvider::builder()
            .client(client.clone())
            .base_url(&config.pollinations_text_url)
            .timeout(timeout)
            .build()?;

        let images = PollinationsImageProvider::builder()
            .client(client)
            .base_url(&config.pollinations_image_url)
            .timeout(timeout)
            .build()?;

        let logging = LoggingLayer::with_prefix(&config.log_prefix);
        let orchestrator = Orchestrator::builder()
            .provider_with_layer(huggingface, logging.clone())
            .provider_with_layer(pollinations, logging)
            .finish();

        Ok(Self::new(orchestrator, images))
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/chat", post(chat))
        .route("/image", post(image))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct ChatReply {
    text: String,
    provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

async fn chat(State(state): State<AppState>, body: Bytes) -> Result<Response, ServerError> {
    let request: ChatRequest = serde_json::from_slice(&body)?;
    let (status, reply) = match state.orchestrator.orchestrate(&request).await {
        OrchestrationOutcome::Success { provider_id, text } => (
            StatusCode::OK,
            ChatReply {
                text,
                provider: provider_id,
                reason: None,
            },
        ),
        OrchestrationOutcome::Demo { text, reason } => (
            StatusCode::SERVICE_UNAVAILABLE,
            ChatReply {
                text,
                provider: DEMO_PROVIDER_ID.to_string(),
                reason: Some(reason),
            },
        ),
    };
    Ok((status, Json(reply)).into_response())
}

#[derive(Debug, Serialize)]
struct ImageReply {
    image: String,
}

async fn image(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ImageReply>, ServerError> {
    let request: Value = serde_json::from_slice(&body)?;
    let prompt = request
        .get("prompt")
        .and_then(Value::as_str)
        .filter(|p| !p.is_empty())
        .ok_or(ServerError::MissingPrompt)?;
    let size = ImageSize::parse(request.get("size").and_then(Value::as_str));

    let image = state.images.generate(prompt, size).await?;
    Ok(Json(ImageReply {
        image: image.to_data_url(),
    }))
}

async fn health() -> Json<Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
