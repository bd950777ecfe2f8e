//! Pollinations image proxy.

use crate::pollinations::url_with_segments;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use deoxys_core::error::AiError;
use deoxys_core::timeout::{with_timeout, DEFAULT_TIMEOUT};
use deoxys_core::types::ImageSize;
use std::time::Duration;

/// Public image endpoint
pub const DEFAULT_IMAGE_BASE: &str = "https://image.pollinations.ai";

/// Content type assumed when the upstream sends none
pub const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";

/// Raw image bytes as returned by the upstream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl GeneratedImage {
    /// Encode as `data:<content-type>;base64,<payload>`
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.content_type, STANDARD.encode(&self.bytes))
    }
}

/// Client for the Pollinations image endpoint
#[derive(Debug, Clone)]
pub struct PollinationsImageProvider {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl PollinationsImageProvider {
    /// Create a client against the public endpoint
    pub fn new() -> Result<Self, AiError> {
        Self::builder().build()
    }

    /// Create a builder
    pub fn builder() -> PollinationsImageBuilder {
        PollinationsImageBuilder::default()
    }

    /// Generate one image for `prompt` at `size`
    pub async fn generate(&self, prompt: &str, size: ImageSize) -> Result<GeneratedImage, AiError> {
        if prompt.is_empty() {
            return Err(AiError::invalid_request("Missing prompt."));
        }
        with_timeout(self.timeout, self.call(prompt, size)).await
    }

    async fn call(&self, prompt: &str, size: ImageSize) -> Result<GeneratedImage, AiError> {
        let mut url = url_with_segments(&self.base_url, &["prompt", prompt])?;
        url.query_pairs_mut()
            .append_pair("width", &size.width.to_string())
            .append_pair("height", &size.height.to_string())
            .append_pair("n", "1");

        let response = self
            .client
            .get(url)
            .header(reqwest::header::CACHE_CONTROL, "no-store")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let err = response.text().await.unwrap_or_default();
            tracing::warn!("Pollinations image error: {} {}", status.as_u16(), err);
            return Err(AiError::upstream_status(status.as_u16(), err));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        let bytes = response.bytes().await?.to_vec();

        tracing::info!("Image provider: pollinations {}", size);
        Ok(GeneratedImage {
            content_type,
            bytes,
        })
    }
}

/// Builder for the image client
#[derive(Default)]
pub struct PollinationsImageBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    client: Option<reqwest::Client>,
}

impl PollinationsImageBuilder {
    /// Set the endpoint base URL
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the request deadline
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Share an existing HTTP client
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<PollinationsImageProvider, AiError> {
        let client = match self.client {
            Some(client) => client,
            None => reqwest::Client::builder().build()?,
        };

        Ok(PollinationsImageProvider {
            client,
            base_url: self
                .base_url
                .unwrap_or_else(|| DEFAULT_IMAGE_BASE.to_string()),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
        })
    }
}
