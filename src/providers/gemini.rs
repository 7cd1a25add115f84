//! Gemini content generation
//!
//! Direct HTTP client for the Gemini generateContent endpoint. Gemini has
//! no native multi-message chat API here, so the conversation history is
//! flattened into a single text prompt.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::providers::error::ProviderError;
use crate::providers::types::{status_text, ChatMessage, FALLBACK_REPLY};

pub(crate) const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const VENDOR: &str = "Gemini";
const MODEL: &str = "gemini-2.5-flash";

/// Request structure for the generateContent call
#[derive(Serialize, Debug)]
struct GenerateContentRequest {
    /// List of content items to send
    contents: Vec<RequestContent>,
}

/// Content structure for requests
#[derive(Serialize, Debug)]
struct RequestContent {
    /// List of content parts
    parts: Vec<RequestPart>,
}

/// A single part for requests (typically text)
#[derive(Serialize, Debug)]
struct RequestPart {
    /// The text content
    text: String,
}

/// Top-level Gemini API response
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    /// List of candidate responses from the model
    #[serde(default)]
    candidates: Vec<Candidate>,
    /// Optional feedback about the prompt (e.g., if it was blocked)
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

/// A single candidate response from the model
#[derive(Deserialize, Debug)]
struct Candidate {
    /// The content of this candidate
    content: CandidateContent,
}

/// Content structure containing parts of the response
#[derive(Deserialize, Debug)]
struct CandidateContent {
    /// List of content parts (typically one text part)
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

/// A single part of content (typically text)
#[derive(Deserialize, Debug)]
struct ResponsePart {
    /// The text content of this part
    text: String,
}

/// Feedback about the prompt (e.g., if it was blocked)
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    /// Reason the prompt was blocked (if applicable)
    #[serde(default)]
    block_reason: Option<String>,
}

/// Flatten a conversation into a single text prompt
///
/// Turns become `"Human: ..."` / `"Assistant: ..."` lines separated by
/// blank lines. Any non-user role is labelled Assistant.
fn flatten_history(history: &[ChatMessage]) -> String {
    history
        .iter()
        .map(|message| {
            let speaker = if message.role == "user" {
                "Human"
            } else {
                "Assistant"
            };
            format!("{}: {}", speaker, message.content)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Request one completion from Gemini
///
/// # Arguments
/// * `base_url` - API base URL (overridden in tests)
/// * `api_key` - Key passed as a query parameter, per the Gemini API
/// * `history` - Full conversation so far, oldest first
pub(crate) async fn complete(
    client: &reqwest::Client,
    base_url: &str,
    api_key: &str,
    history: &[ChatMessage],
) -> Result<String, ProviderError> {
    let prompt = flatten_history(history);
    let url = format!(
        "{}/models/{}:generateContent?key={}",
        base_url, MODEL, api_key
    );

    let request_body = GenerateContentRequest {
        contents: vec![RequestContent {
            parts: vec![RequestPart { text: prompt }],
        }],
    };

    debug!(model = MODEL, turns = history.len(), "Calling Gemini API");

    let response = client
        .post(&url)
        .json(&request_body)
        .send()
        .await
        .map_err(|e| ProviderError::Request {
            vendor: VENDOR,
            source: e,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::Api {
            vendor: VENDOR,
            status_text: status_text(status),
        });
    }

    let parsed: GenerateContentResponse =
        response.json().await.map_err(|e| ProviderError::Payload {
            vendor: VENDOR,
            source: e,
        })?;

    // A blocked prompt is an error; an empty answer is not
    if let Some(feedback) = &parsed.prompt_feedback {
        if let Some(reason) = &feedback.block_reason {
            return Err(ProviderError::PromptBlocked {
                vendor: VENDOR,
                reason: reason.clone(),
            });
        }
    }

    let text = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content.parts.into_iter().next())
        .map(|part| part.text)
        .unwrap_or_default();

    if text.is_empty() {
        Ok(FALLBACK_REPLY.to_string())
    } else {
        Ok(text)
    }
}
