//! Core types for chat orchestration.

use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::sync::OnceLock;

/// Message role
///
/// Roles other than `user` and `assistant` are kept verbatim and flattened
/// into the prompt under their uppercased name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum Role {
    User,
    Assistant,
    Other(String),
}

impl Role {
    /// Uppercase tag used when the conversation is flattened into a prompt
    pub fn as_tag(&self) -> Cow<'static, str> {
        match self {
            Role::User => Cow::Borrowed("USER"),
            Role::Assistant => Cow::Borrowed("ASSISTANT"),
            Role::Other(name) => Cow::Owned(name.to_uppercase()),
        }
    }
}

impl From<String> for Role {
    fn from(name: String) -> Self {
        match name.as_str() {
            "user" => Role::User,
            "assistant" => Role::Assistant,
            _ => {
                tracing::warn!("Unrecognised chat role '{}', passing it through", name);
                Role::Other(name)
            }
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::User => "user".to_string(),
            Role::Assistant => "assistant".to_string(),
            Role::Other(name) => name,
        }
    }
}

/// Message in a conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    /// Create a new user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create a new assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Chat request as received from the client
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub messages: Vec<ChatMessage>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub simplify_mode: bool,
}

/// Treat an explicit `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ChatRequest {
    /// Create a conversational request
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            simplify_mode: false,
        }
    }

    /// Create a simplify-mode request for a single piece of text
    pub fn simplify(text: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::user(text)],
            simplify_mode: true,
        }
    }

    /// The text a simplify-mode request operates on
    pub fn simplify_input(&self) -> &str {
        self.messages
            .first()
            .map(|m| m.content.as_str())
            .unwrap_or("")
    }
}

/// A successful provider answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderResult {
    pub provider_id: String,
    pub text: String,
}

impl ProviderResult {
    /// Build a result, rejecting text that is empty after trimming
    pub fn new(provider_id: impl Into<String>, text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            provider_id: provider_id.into(),
            text: text.to_string(),
        })
    }
}

/// Result of running the fallback chain. Always produced, never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrchestrationOutcome {
    Success { provider_id: String, text: String },
    Demo { text: String, reason: String },
}

impl OrchestrationOutcome {
    /// Provider identifier reported to the client
    pub fn provider(&self) -> &str {
        match self {
            OrchestrationOutcome::Success { provider_id, .. } => provider_id,
            OrchestrationOutcome::Demo { .. } => DEMO_PROVIDER_ID,
        }
    }

    /// Response text
    pub fn text(&self) -> &str {
        match self {
            OrchestrationOutcome::Success { text, .. } | OrchestrationOutcome::Demo { text, .. } => {
                text
            }
        }
    }

    /// Whether the outcome came from the local degraded path
    pub fn is_demo(&self) -> bool {
        matches!(self, OrchestrationOutcome::Demo { .. })
    }
}

impl From<ProviderResult> for OrchestrationOutcome {
    fn from(result: ProviderResult) -> Self {
        OrchestrationOutcome::Success {
            provider_id: result.provider_id,
            text: result.text,
        }
    }
}

/// Provider identifier used for the local degraded response
pub const DEMO_PROVIDER_ID: &str = "demo";

/// Provider information
#[derive(Debug, Clone)]
pub struct ProviderInfo {
    pub id: String,
    pub name: String,
    /// Settings an operator can change to enable this provider
    pub hint: Option<String>,
}

impl ProviderInfo {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            hint: None,
        }
    }

    /// Attach a configuration hint shown when the provider is skipped
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Name as listed in the exhaustion reason
    pub fn display_name(&self) -> String {
        match &self.hint {
            Some(hint) => format!("{} ({})", self.name, hint),
            None => self.name.clone(),
        }
    }
}

/// Per-request context used to correlate log lines
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: String,
    pub simplify_mode: bool,
}

impl RequestContext {
    /// Create a new request context
    pub fn new(simplify_mode: bool) -> Self {
        Self {
            request_id: uuid::Uuid::new_v4().to_string(),
            simplify_mode,
        }
    }
}

// ============================================================================
// Image Types
// ============================================================================

/// Requested image dimensions, clamped to what the upstream accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub const MIN: u32 = 64;
    pub const MAX: u32 = 2048;
    pub const DEFAULT: ImageSize = ImageSize {
        width: 512,
        height: 512,
    };

    /// Parse a `WxH` string. Anything unparseable yields the default size.
    pub fn parse(size: Option<&str>) -> Self {
        static SIZE_RE: OnceLock<regex::Regex> = OnceLock::new();
        let re = SIZE_RE.get_or_init(|| {
            regex::Regex::new(r"^(?i)([0-9]+)x([0-9]+)$").expect("size pattern is valid")
        });

        let Some(caps) = size.and_then(|s| re.captures(s)) else {
            return Self::DEFAULT;
        };

        Self {
            width: Self::clamp_dimension(&caps[1]),
            height: Self::clamp_dimension(&caps[2]),
        }
    }

    fn clamp_dimension(digits: &str) -> u32 {
        // Overflowing numerals are necessarily above the maximum.
        digits
            .parse::<u64>()
            .map(|v| v.clamp(Self::MIN as u64, Self::MAX as u64) as u32)
            .unwrap_or(Self::MAX)
    }
}

impl Default for ImageSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_deserialize() {
        let req: ChatRequest = serde_json::from_str(
            r#"{"messages":[{"role":"user","content":"Hi"},{"role":"assistant","content":"Hello"}],"simplifyMode":true}"#,
        )
        .unwrap();
        assert!(req.simplify_mode);
        assert_eq!(req.messages.len(), 2);
        assert_eq!(req.messages[1].role, Role::Assistant);
        assert_eq!(req.simplify_input(), "Hi");

        let empty: ChatRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.messages.is_empty());
        assert!(!empty.simplify_mode);
        assert_eq!(empty.simplify_input(), "");
    }

    #[test]
    fn test_chat_request_null_fields() {
        let req: ChatRequest =
            serde_json::from_str(r#"{"messages":null,"simplifyMode":null}"#).unwrap();
        assert!(req.messages.is_empty());
        assert!(!req.simplify_mode);

        let req: ChatRequest = serde_json::from_str(
            r#"{"messages":[{"role":"user","content":"Hi"}],"simplifyMode":null}"#,
        )
        .unwrap();
        assert_eq!(req.messages.len(), 1);
        assert!(!req.simplify_mode);
    }

    #[test]
    fn test_unknown_role_is_kept() {
        let msg: ChatMessage =
            serde_json::from_str(r#"{"role":"system","content":"Be brief"}"#).unwrap();
        assert_eq!(msg.role, Role::Other("system".into()));
        assert_eq!(msg.role.as_tag(), "SYSTEM");
        assert_eq!(Role::User.as_tag(), "USER");

        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "system");
        assert_eq!(serde_json::to_value(ChatMessage::assistant("x")).unwrap()["role"], "assistant");
    }

    #[test]
    fn test_provider_result_rejects_blank_text() {
        assert!(ProviderResult::new("p", "   \n").is_none());
        let result = ProviderResult::new("p", "  hi  ").unwrap();
        assert_eq!(result.text, "hi");
    }

    #[test]
    fn test_outcome_accessors() {
        let demo = OrchestrationOutcome::Demo {
            text: "t".into(),
            reason: "r".into(),
        };
        assert_eq!(demo.provider(), "demo");
        assert!(demo.is_demo());

        let ok: OrchestrationOutcome = ProviderResult::new("pollinations:text", "x").unwrap().into();
        assert_eq!(ok.provider(), "pollinations:text");
        assert_eq!(ok.text(), "x");
    }

    #[test]
    fn test_image_size_parse() {
        assert_eq!(ImageSize::parse(Some("256x256")), ImageSize { width: 256, height: 256 });
        assert_eq!(ImageSize::parse(Some("10000x10000")), ImageSize { width: 2048, height: 2048 });
        assert_eq!(ImageSize::parse(Some("1X2")), ImageSize { width: 64, height: 64 });
        assert_eq!(ImageSize::parse(Some("abcxdef")), ImageSize::DEFAULT);
        assert_eq!(ImageSize::parse(Some(" 256x256")), ImageSize::DEFAULT);
        assert_eq!(ImageSize::parse(None), ImageSize::DEFAULT);
        assert_eq!(
            ImageSize::parse(Some("99999999999999999999999x100")),
            ImageSize { width: 2048, height: 100 }
        );
        assert_eq!(ImageSize::DEFAULT.to_string(), "512x512");
    }
}
