//! Hugging Face inference API provider.
//!
//! Tries a list of candidate models in order. Each model gets up to two
//! attempts: a 503 means the model is still loading, so the same model is
//! retried after a flat delay. A 401 aborts the whole adapter since no other
//! model will accept the same token. Every other failure moves on to the next
//! model.

use deoxys_core::error::AiError;
use deoxys_core::provider::TextProvider;
use deoxys_core::retry::RetryPolicy;
use deoxys_core::timeout::{with_timeout, DEFAULT_TIMEOUT};
use deoxys_core::types::*;
use async_trait::async_trait;
use reqwest::Url;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Public inference endpoint
pub const DEFAULT_API_BASE: &str = "https://api-inference.huggingface.co";

/// Primary model when none is configured
pub const DEFAULT_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.2";

/// Models tried after the primary one
pub const FALLBACK_MODELS: [&str; 2] = ["HuggingFaceH4/zephyr-7b-beta", "google/gemma-2b-it"];

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParameters,
    options: InferenceOptions,
}

#[derive(Debug, Serialize)]
struct GenerationParameters {
    max_new_tokens: u32,
    temperature: f32,
    return_full_text: bool,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            max_new_tokens: 200,
            temperature: 0.4,
            return_full_text: false,
        }
    }
}

#[derive(Debug, Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
    use_cache: bool,
}

/// Pull generated text out of the response shapes the inference API uses.
///
/// Checked in order: `[{generated_text}]`, `{generated_text}`,
/// `[{summary_text}]`, then a bare JSON string.
pub fn extract_generated_text(json: &Value) -> Option<&str> {
    fn field<'a>(value: Option<&'a Value>, key: &str) -> Option<&'a str> {
        value
            .and_then(|v| v.get(key))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    let first = json.as_array().and_then(|items| items.first());

    field(first, "generated_text")
        .or_else(|| field(Some(json), "generated_text"))
        .or_else(|| field(first, "summary_text"))
        .or_else(|| json.as_str())
}

/// Hugging Face text-generation provider
#[derive(Clone)]
pub struct HuggingFaceProvider {
    client: reqwest::Client,
    api_key: Option<String>,
    api_base: String,
    models: Vec<String>,
    timeout: Duration,
    retry: RetryPolicy,
    info: Arc<ProviderInfo>,
}

impl std::fmt::Debug for HuggingFaceProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HuggingFaceProvider")
            .field("info", &self.info)
            .field("configured", &self.api_key.is_some())
            .field("models", &self.models)
            .finish()
    }
}

impl HuggingFaceProvider {
    /// Create a builder
    pub fn builder() -> HuggingFaceBuilder {
        HuggingFaceBuilder::default()
    }

    /// Candidate models in the order they are tried
    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Whether an access token is configured
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn model_url(&self, model: &str) -> Result<Url, AiError> {
        let mut url = Url::parse(&self.api_base)
            .map_err(|e| AiError::configuration(format!("Invalid Hugging Face URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| AiError::configuration("Hugging Face URL cannot be a base"))?
            .pop_if_empty()
            .push("models")
            .push(model);
        url.query_pairs_mut().append_pair("wait_for_model", "true");
        Ok(url)
    }

    /// One attempt against one model
    async fn call_model(
        &self,
        api_key: &str,
        model: &str,
        prompt: &str,
    ) -> Result<ProviderResult, AiError> {
        let url = self.model_url(model)?;
        let body = InferenceRequest {
            inputs: prompt,
            parameters: GenerationParameters::default(),
            options: InferenceOptions {
                wait_for_model: true,
                use_cache: true,
            },
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        match status.as_u16() {
            503 => {
                tracing::debug!("HF 503 (warming): {}", model);
                return Err(AiError::warming_up(model));
            }
            401 => {
                let err = response.text().await.unwrap_or_default();
                return Err(AiError::unauthorized(err));
            }
            404 => return Err(AiError::model_not_found(model)),
            code if !status.is_success() => {
                let err = response.text().await.unwrap_or_default();
                return Err(AiError::upstream_status(code, err));
            }
            _ => {}
        }

        let json: Value = response
            .json()
            .await
            .map_err(|_| AiError::empty_response(model))?;
        let text = extract_generated_text(&json).unwrap_or_default();

        ProviderResult::new(format!("huggingface:{}", model), text)
            .ok_or_else(|| AiError::empty_response(model))
    }
}

#[async_trait]
impl TextProvider for HuggingFaceProvider {
    fn info(&self) -> Arc<ProviderInfo> {
        self.info.clone()
    }

    async fn generate(&self, prompt: &str) -> Result<ProviderResult, AiError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AiError::configuration("HF_ACCESS_TOKEN is not set"))?;

        for model in &self.models {
            let outcome = self
                .retry
                .execute(|| with_timeout(self.timeout, self.call_model(api_key, model, prompt)))
                .await;

            match outcome {
                Ok(result) => {
                    tracing::debug!("Chat provider: huggingface {}", model);
                    return Ok(result);
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    tracing::warn!("HF model {} failed, trying next: {}", model, e);
                }
            }
        }

        Err(AiError::no_result(self.info.id.clone()))
    }
}

/// Builder for the Hugging Face provider
#[derive(Default)]
pub struct HuggingFaceBuilder {
    api_key: Option<String>,
    api_base: Option<String>,
    model: Option<String>,
    fallback_models: Option<Vec<String>>,
    timeout: Option<Duration>,
    retry: Option<RetryPolicy>,
    client: Option<reqwest::Client>,
}

impl HuggingFaceBuilder {
    /// Set the access token. Blank tokens count as absent.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        let key = api_key.into().trim().to_string();
        self.api_key = (!key.is_empty()).then_some(key);
        self
    }

    /// Set the access token from an optional value
    pub fn maybe_api_key(self, api_key: Option<String>) -> Self {
        match api_key {
            Some(key) => self.api_key(key),
            None => self,
        }
    }

    /// Set API base URL
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    /// Set the primary model. Blank values keep the default.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        let model = model.into().trim().to_string();
        if !model.is_empty() {
            self.model = Some(model);
        }
        self
    }

    /// Replace the fallback models tried after the primary one
    pub fn fallback_models<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fallback_models = Some(models.into_iter().map(Into::into).collect());
        self
    }

    /// Set the per-call deadline
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the warm-up retry policy
    pub fn retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = Some(retry);
        self
    }

    /// Share an existing HTTP client
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Build the provider
    pub fn build(self) -> Result<HuggingFaceProvider, AiError> {
        let client = match self.client {
            Some(client) => client,
            None => reqwest::Client::builder().build()?,
        };

        let mut models = vec![self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string())];
        let fallbacks = self
            .fallback_models
            .unwrap_or_else(|| FALLBACK_MODELS.iter().map(|m| m.to_string()).collect());
        models.extend(fallbacks);

        Ok(HuggingFaceProvider {
            client,
            api_key: self.api_key,
            api_base: self
                .api_base
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            models,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            retry: self.retry.unwrap_or_else(RetryPolicy::warmup),
            info: Arc::new(
                ProviderInfo::new("huggingface", "Hugging Face")
                    .with_hint("HF_ACCESS_TOKEN/HF_CHAT_MODEL"),
            ),
        })
    }
}
