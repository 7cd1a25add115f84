//! GitHub Models chat completions
//!
//! GitHub Models exposes an OpenAI-compatible inference endpoint, keyed by
//! a GitHub token supplied per request.

use tracing::debug;

use crate::providers::error::ProviderError;
use crate::providers::types::{status_text, ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

pub(crate) const DEFAULT_BASE_URL: &str = "https://models.inference.ai.azure.com";

const VENDOR: &str = "GitHub";
const MODEL: &str = "gpt-4o";

/// Request one completion from GitHub Models
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

    debug!(model = MODEL, turns = history.len(), "Calling GitHub Models API");

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
