//! Shared provider wire types
//!
//! The OpenAI-style chat completion format, used verbatim by OpenAI,
//! OpenRouter and GitHub Models. Gemini has its own shapes in the gemini
//! module.

use serde::{Deserialize, Serialize};

/// Substituted when a vendor response carries no usable text
pub const FALLBACK_REPLY: &str = "Sorry, I couldn't generate a response.";

/// One turn of conversation context, oldest first when in a slice
///
/// Doubles as the wire shape for chat-completion requests, which use the
/// same `{role, content}` pairs.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// "user", "assistant" or "system"
    pub role: String,
    /// The turn's text
    pub content: String,
}

impl ChatMessage {
    /// Build a turn from any string-like role and content
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// Request body for a chat completion call
#[derive(Serialize, Debug)]
pub struct ChatCompletionRequest {
    /// Vendor-specific model identifier
    pub model: String,
    /// Full conversation history, oldest first
    pub messages: Vec<ChatMessage>,
}

/// Top-level chat completion response
#[derive(Deserialize, Debug)]
pub struct ChatCompletionResponse {
    /// Candidate completions; the first one is used
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// A single candidate completion
#[derive(Deserialize, Debug)]
pub struct Choice {
    /// The completion message for this candidate
    pub message: ResponseMessage,
}

/// The assistant message inside a choice
#[derive(Deserialize, Debug)]
pub struct ResponseMessage {
    /// May be absent or empty for refusals and tool-only replies
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Text of the first choice, or [`FALLBACK_REPLY`] when there is none
    pub fn reply_text(self) -> String {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .unwrap_or_else(|| FALLBACK_REPLY.to_string())
    }
}

/// Human-readable status text for an HTTP status code
///
/// Falls back to the numeric code for statuses without a canonical reason.
pub(crate) fn status_text(status: reqwest::StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string())
}
