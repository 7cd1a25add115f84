//! Error types and error handling for the application
//!
//! This module defines custom error types that can be converted to HTTP responses.
//! All errors implement `IntoResponse` to provide consistent error formatting.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::providers::ProviderError;

/// Application-level error types
///
/// All errors that can occur in the application are represented by this enum.
/// Each variant implements automatic conversion to HTTP responses via `IntoResponse`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Chat request failed validation (empty message, unknown provider)
    #[error("Invalid request data")]
    Validation {
        /// One entry per failed check, returned to the client
        details: Vec<String>,
    },

    /// Referenced conversation does not exist
    #[error("Conversation not found")]
    ConversationNotFound,

    /// Provider adapter failure (credentials, transport, vendor status)
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Internal server error (catch-all for unexpected errors)
    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Validation { details } => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Invalid request data", "details": details }),
            ),
            AppError::ConversationNotFound => (
                StatusCode::NOT_FOUND,
                json!({ "error": "Conversation not found" }),
            ),
            // Provider messages go out as-is so clients see the vendor's
            // status text
            AppError::Provider(e) => {
                tracing::error!("Provider call failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": e.to_string() }),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:#}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": format!("Internal server error: {}", e) }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
