//! Pollinations public text endpoint.
//!
//! Anonymous, unconfigured, single implicit model: one GET with the prompt
//! in the path, no retries.

use deoxys_core::error::AiError;
use deoxys_core::provider::TextProvider;
use deoxys_core::timeout::{with_timeout, DEFAULT_TIMEOUT};
use deoxys_core::types::*;
use async_trait::async_trait;
use reqwest::Url;
use std::sync::Arc;
use std::time::Duration;

/// Public text endpoint
pub const DEFAULT_TEXT_BASE: &str = "https://text.pollinations.ai";

/// Identifier reported for every Pollinations text answer
pub const PROVIDER_ID: &str = "pollinations:text";

/// Append each of `segments` to `base` as a percent-encoded path segment.
pub(crate) fn url_with_segments(base: &str, segments: &[&str]) -> Result<Url, AiError> {
    let mut url = Url::parse(base)
        .map_err(|e| AiError::configuration(format!("Invalid Pollinations URL: {}", e)))?;
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| AiError::configuration("Pollinations URL cannot be a base"))?;
        path.pop_if_empty();
        for segment in segments {
            path.push(segment);
        }
    }
    Ok(url)
}

/// Pollinations text-generation provider
#[derive(Debug, Clone)]
pub struct PollinationsProvider {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
    info: Arc<ProviderInfo>,
}

impl PollinationsProvider {
    /// Create a provider against the public endpoint
    pub fn new() -> Result<Self, AiError> {
        Self::builder().build()
    }

    /// Create a builder
    pub fn builder() -> PollinationsBuilder {
        PollinationsBuilder::default()
    }

    async fn call(&self, prompt: &str) -> Result<ProviderResult, AiError> {
        let url = url_with_segments(&self.base_url, &[prompt])?;
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let err = response.text().await.unwrap_or_default();
            return Err(AiError::upstream_status(status.as_u16(), err));
        }

        let text = response.text().await?;
        ProviderResult::new(PROVIDER_ID, &text).ok_or_else(|| AiError::empty_response(PROVIDER_ID))
    }
}

#[async_trait]
impl TextProvider for PollinationsProvider {
    fn info(&self) -> Arc<ProviderInfo> {
        self.info.clone()
    }

    async fn generate(&self, prompt: &str) -> Result<ProviderResult, AiError> {
        with_timeout(self.timeout, self.call(prompt)).await
    }
}

/// Builder for the Pollinations text provider
#[derive(Default)]
pub struct PollinationsBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    client: Option<reqwest::Client>,
}

impl PollinationsBuilder {
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

    /// Build the provider
    pub fn build(self) -> Result<PollinationsProvider, AiError> {
        let client = match self.client {
            Some(client) => client,
            None => reqwest::Client::builder().build()?,
        };

        Ok(PollinationsProvider {
            client,
            base_url: self
                .base_url
                .unwrap_or_else(|| DEFAULT_TEXT_BASE.to_string()),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            info: Arc::new(ProviderInfo::new("pollinations", "Pollinations")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_is_one_encoded_segment() {
        let url = url_with_segments(DEFAULT_TEXT_BASE, &["What is 1/2? A half & more"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://text.pollinations.ai/What%20is%201%2F2%3F%20A%20half%20&%20more"
        );
    }

    #[test]
    fn test_nested_base_path() {
        let url = url_with_segments("http://localhost:9000/proxy/", &["prompt", "a b"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/proxy/prompt/a%20b");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_yields_none() {
        let provider = PollinationsProvider::builder()
            .base_url("http://127.0.0.1:1")
            .build()
            .unwrap();
        assert!(matches!(
            provider.generate("hello").await,
            Err(AiError::Network(_))
        ));
        assert!(provider.try_generate("hello").await.is_none());
    }
}
