//! Provider adapter module
//!
//! Maps a logical provider identifier to one outbound completion call,
//! normalizing each vendor's request and response shape to plain text.
//! One call per chat turn; no retries, no streaming.

pub mod error;
pub mod types;

mod gemini;
mod github;
mod openai;
mod openrouter;

use std::fmt;
use std::str::FromStr;

pub use error::ProviderError;
pub use types::{ChatMessage, FALLBACK_REPLY};

/// The fixed set of supported providers
///
/// A closed enumeration rather than an open extension point: adding a
/// vendor means adding a variant here and an arm to the dispatch match,
/// both checked exhaustively by the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    /// OpenAI chat completions
    OpenAi,
    /// Google Gemini content generation
    Gemini,
    /// OpenRouter chat completions
    OpenRouter,
    /// GitHub Models inference
    GitHub,
}

impl Provider {
    /// The wire identifier, as accepted in requests and stored on
    /// conversations
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Gemini => "gemini",
            Provider::OpenRouter => "openrouter",
            Provider::GitHub => "github",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "openai" => Ok(Provider::OpenAi),
            "gemini" => Ok(Provider::Gemini),
            "openrouter" => Ok(Provider::OpenRouter),
            "github" => Ok(Provider::GitHub),
            other => Err(ProviderError::Unsupported(other.to_string())),
        }
    }
}

/// Process-wide fallback credentials sourced from the environment
///
/// Only OpenAI and Gemini have a server-side fallback. OpenRouter and
/// GitHub keys are held client-side and supplied per request.
#[derive(Clone, Default)]
pub struct DefaultCredentials {
    /// Fallback OpenAI key
    pub openai: Option<String>,
    /// Fallback Gemini key
    pub gemini: Option<String>,
}

/// Base URL for each vendor endpoint
///
/// Defaults to the real vendor URLs; tests point these at a local mock
/// server instead.
#[derive(Clone, Debug)]
pub struct ProviderEndpoints {
    /// OpenAI API base URL
    pub openai: String,
    /// Gemini API base URL
    pub gemini: String,
    /// OpenRouter API base URL
    pub openrouter: String,
    /// GitHub Models API base URL
    pub github: String,
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        Self {
            openai: openai::DEFAULT_BASE_URL.to_string(),
            gemini: gemini::DEFAULT_BASE_URL.to_string(),
            openrouter: openrouter::DEFAULT_BASE_URL.to_string(),
            github: github::DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Provider adapter
///
/// Holds the shared HTTP client (connection pooling across turns) plus the
/// configured fallback credentials and endpoint URLs. Cheap to clone.
#[derive(Clone)]
pub struct ProviderClient {
    http: reqwest::Client,
    defaults: DefaultCredentials,
    endpoints: ProviderEndpoints,
}

impl ProviderClient {
    /// Build a client against the real vendor endpoints
    pub fn new(defaults: DefaultCredentials) -> Self {
        Self::with_endpoints(defaults, ProviderEndpoints::default())
    }

    /// Build a client with custom endpoint URLs (for testing)
    pub fn with_endpoints(defaults: DefaultCredentials, endpoints: ProviderEndpoints) -> Self {
        Self {
            http: reqwest::Client::new(),
            defaults,
            endpoints,
        }
    }

    /// Produce one assistant completion for the given history
    ///
    /// `history` is the full prior conversation, oldest first. An explicit
    /// `api_key` wins over the configured fallback; a missing credential
    /// fails before any network call is made.
    pub async fn generate_response(
        &self,
        provider: Provider,
        history: &[ChatMessage],
        api_key: Option<&str>,
    ) -> Result<String, ProviderError> {
        let api_key = non_empty(api_key);
        match provider {
            Provider::OpenAi => {
                let key = api_key
                    .or(self.defaults.openai.as_deref())
                    .ok_or(ProviderError::MissingCredential("OpenAI API key not provided"))?;
                openai::complete(&self.http, &self.endpoints.openai, key, history).await
            }
            Provider::Gemini => {
                let key = api_key
                    .or(self.defaults.gemini.as_deref())
                    .ok_or(ProviderError::MissingCredential("Gemini API key not provided"))?;
                gemini::complete(&self.http, &self.endpoints.gemini, key, history).await
            }
            Provider::OpenRouter => {
                let key = api_key
                    .ok_or(ProviderError::MissingCredential("OpenRouter API key required"))?;
                openrouter::complete(&self.http, &self.endpoints.openrouter, key, history).await
            }
            Provider::GitHub => {
                let key = api_key
                    .ok_or(ProviderError::MissingCredential("GitHub API key required"))?;
                github::complete(&self.http, &self.endpoints.github, key, history).await
            }
        }
    }
}

/// Treat an empty key the same as an absent one
fn non_empty(key: Option<&str>) -> Option<&str> {
    key.filter(|k| !k.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_identifiers_round_trip() {
        for (text, provider) in [
            ("openai", Provider::OpenAi),
            ("gemini", Provider::Gemini),
            ("openrouter", Provider::OpenRouter),
            ("github", Provider::GitHub),
        ] {
            assert_eq!(text.parse::<Provider>().unwrap(), provider);
            assert_eq!(provider.as_str(), text);
        }
    }

    #[test]
    fn unknown_identifier_is_unsupported() {
        let error = "claude".parse::<Provider>().unwrap_err();
        assert_eq!(error.to_string(), "Unsupported provider: claude");
    }

    // A MissingCredential error proves the adapter failed before reaching
    // the network; these clients have no reachable endpoints configured.
    fn keyless_client() -> ProviderClient {
        ProviderClient::new(DefaultCredentials::default())
    }

    #[tokio::test]
    async fn openai_without_any_key_fails_before_the_network() {
        let history = vec![ChatMessage::new("user", "Hi")];
        let error = keyless_client()
            .generate_response(Provider::OpenAi, &history, None)
            .await
            .unwrap_err();
        assert!(matches!(error, ProviderError::MissingCredential(_)));
        assert_eq!(error.to_string(), "OpenAI API key not provided");
    }

    #[tokio::test]
    async fn gemini_without_any_key_fails_before_the_network() {
        let history = vec![ChatMessage::new("user", "Hi")];
        let error = keyless_client()
            .generate_response(Provider::Gemini, &history, None)
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), "Gemini API key not provided");
    }

    #[tokio::test]
    async fn openrouter_ignores_the_configured_fallbacks() {
        let defaults = DefaultCredentials {
            openai: Some("env-openai".to_string()),
            gemini: Some("env-gemini".to_string()),
        };
        let client = ProviderClient::new(defaults);
        let history = vec![ChatMessage::new("user", "Hi")];

        let error = client
            .generate_response(Provider::OpenRouter, &history, None)
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), "OpenRouter API key required");

        let error = client
            .generate_response(Provider::GitHub, &history, None)
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), "GitHub API key required");
    }

    #[tokio::test]
    async fn empty_key_counts_as_absent() {
        let history = vec![ChatMessage::new("user", "Hi")];
        let error = keyless_client()
            .generate_response(Provider::OpenAi, &history, Some(""))
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), "OpenAI API key not provided");

        let error = keyless_client()
            .generate_response(Provider::OpenRouter, &history, Some(""))
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), "OpenRouter API key required");
    }

    #[tokio::test]
    async fn explicit_key_wins_over_fallback() {
        use mockito::{Matcher, Server};

        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer explicit-key")
            .match_body(Matcher::PartialJson(serde_json::json!({"model": "gpt-4o"})))
            .with_status(200)
            .with_body(r#"{"choices": [{"message": {"content": "ok"}}]}"#)
            .create_async()
            .await;

        let defaults = DefaultCredentials {
            openai: Some("env-key".to_string()),
            gemini: None,
        };
        let endpoints = ProviderEndpoints {
            openai: server.url(),
            ..ProviderEndpoints::default()
        };
        let client = ProviderClient::with_endpoints(defaults, endpoints);
        let history = vec![ChatMessage::new("user", "Hi")];

        let reply = client
            .generate_response(Provider::OpenAi, &history, Some("explicit-key"))
            .await
            .unwrap();
        mock.assert_async().await;
        assert_eq!(reply, "ok");
    }
}
