//! OpenAI chat completions
//!
//! Direct HTTP client for the OpenAI chat completions endpoint. The full
//! conversation history is sent verbatim as chat messages.

use tracing::debug;

use crate::providers::error::ProviderError;
use crate::providers::types::{status_text, ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

pub(crate) const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

const VENDOR: &str = "OpenAI";
const MODEL: &str = "gpt-4o";

/// Request one completion from OpenAI
///
/// # Arguments
/// * `base_url` - API base URL (overridden in tests)
/// * `api_key` - Bearer token for the request
/// * `history` - Full conversation so far, oldest first
pub(crate) async fn complete(
    client: &reqwest::Client,
    base_url: &str,
    api_key: &str,
    history: &[ChatMessage],
) -> Result<String, ProviderError> {
    let request_body = ChatCompletionRequest {
        model: MODEL.to_string(),
        messages: history.to_vec(),
    };

    debug!(model = MODEL, turns = history.len(), "Calling OpenAI API");

    let response = client
        .post(format!("{}/chat/completions", base_url))
        .bearer_auth(api_key)
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

    let parsed: ChatCompletionResponse =
        response.json().await.map_err(|e| ProviderError::Payload {
            vendor: VENDOR,
            source: e,
        })?;

    Ok(parsed.reply_text())
}
