//! Server configuration.
//!
//! Sources are merged in order, later ones winning:
//! built-in defaults, `deoxys.toml`, `DEOXYS_*` environment variables, and
//! finally the bare `HF_ACCESS_TOKEN` / `HF_CHAT_MODEL` variables.

use deoxys_provider::huggingface::DEFAULT_API_BASE;
use deoxys_provider::image::DEFAULT_IMAGE_BASE;
use deoxys_provider::pollinations::DEFAULT_TEXT_BASE;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Config file read from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "deoxys.toml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address
    pub bind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hf_access_token: Option<String>,
    /// Primary Hugging Face model; blank keeps the built-in default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hf_chat_model: Option<String>,
    pub huggingface_base_url: String,
    pub pollinations_text_url: String,
    pub pollinations_image_url: String,
    pub request_timeout_ms: u64,
    pub warmup_delay_ms: u64,
    pub log_prefix: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
            hf_access_token: None,
            hf_chat_model: None,
            huggingface_base_url: DEFAULT_API_BASE.to_string(),
            pollinations_text_url: DEFAULT_TEXT_BASE.to_string(),
            pollinations_image_url: DEFAULT_IMAGE_BASE.to_string(),
            request_timeout_ms: 30_000,
            warmup_delay_ms: 1_500,
            log_prefix: "[Deoxys]".to_string(),
        }
    }
}

impl ServerConfig {
    /// Layered configuration sources, ready to extract
    pub fn figment(path: Option<&Path>) -> Figment {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        Figment::new()
            .merge(Serialized::defaults(ServerConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("DEOXYS_"))
            .merge(Env::raw().only(&["HF_ACCESS_TOKEN", "HF_CHAT_MODEL"]))
    }

    /// Load configuration from every source
    pub fn load(path: Option<&Path>) -> Result<Self, Box<figment::Error>> {
        Self::figment(path).extract().map_err(Box::new)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn warmup_delay(&self) -> Duration {
        Duration::from_millis(self.warmup_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind, "127.0.0.1:3000");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.warmup_delay(), Duration::from_millis(1500));
        assert_eq!(config.pollinations_text_url, "https://text.pollinations.ai");
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deoxys.toml");
        std::fs::write(
            &path,
            "bind = \"0.0.0.0:8080\"\nrequest_timeout_ms = 5000\nlog_prefix = \"[test]\"\n",
        )
        .unwrap();

        let config = ServerConfig::load(Some(&path)).unwrap();
        assert_eq!(config.bind, "0.0.0.0:8080");
        assert_eq!(config.request_timeout_ms, 5000);
        assert_eq!(config.log_prefix, "[test]");
        assert_eq!(config.warmup_delay_ms, 1500);
    }

    #[test]
    fn test_missing_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.pollinations_image_url, DEFAULT_IMAGE_BASE);
    }

    #[test]
    fn test_later_sources_win() {
        let config: ServerConfig = ServerConfig::figment(None)
            .merge(Serialized::default("hf_access_token", "hf_from_test"))
            .extract()
            .unwrap();
        assert_eq!(config.hf_access_token.as_deref(), Some("hf_from_test"));
    }
}
