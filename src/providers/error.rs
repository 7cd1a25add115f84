//! Provider error types
//!
//! Failures from the provider adapter. Request handlers convert these to
//! HTTP responses via `AppError`.

use thiserror::Error;

/// Errors produced by the provider adapter
///
/// `MissingCredential` carries the full vendor-specific message so that the
/// wording matches what clients already display.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// No API key available for the chosen provider; raised before any
    /// network call is made
    #[error("{0}")]
    MissingCredential(&'static str),

    /// Provider identifier is not one of the supported set
    #[error("Unsupported provider: {0}")]
    Unsupported(String),

    /// The outbound HTTP request could not be sent
    #[error("Failed to send request to {vendor}: {source}")]
    Request {
        vendor: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The vendor returned a non-success HTTP status
    #[error("{vendor} API error: {status_text}")]
    Api {
        vendor: &'static str,
        status_text: String,
    },

    /// The vendor response body could not be read or parsed
    #[error("Failed to parse {vendor} response: {source}")]
    Payload {
        vendor: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The vendor refused to answer the prompt
    #[error("{vendor} blocked the prompt: {reason}")]
    PromptBlocked {
        vendor: &'static str,
        reason: String,
    },
}
