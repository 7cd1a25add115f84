//! OpenRouter chat completions
//!
//! OpenRouter speaks the OpenAI chat completion format but wants two extra
//! attribution headers identifying the calling application.

use tracing::debug;

use crate::providers::error::ProviderError;
use crate::providers::types::{status_text, ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

pub(crate) const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

const VENDOR: &str = "OpenRouter";
const MODEL: &str = "anthropic/claude-3.5-sonnet";

/// Attribution headers required by OpenRouter's usage policy
const REFERER: &str = "http://localhost:5000";
const APP_TITLE: &str = "AI Chat Application";

/// Request one completion from OpenRouter
///
/// Callers must supply an explicit key; there is no server-side fallback.
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

    debug!(model = MODEL, turns = history.len(), "Calling OpenRouter API");

    let response = client
        .post(format!("{}/chat/completions", base_url))
        .bearer_auth(api_key)
        .header("HTTP-Referer", REFERER)
        .header("X-Title", APP_TITLE)
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
