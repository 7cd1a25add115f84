//! Chat endpoint
//!
//! POST /api/chat drives one full chat turn:
//! resolve or create the conversation, persist the user message, replay the
//! full history to the chosen provider, persist the assistant reply.

use axum::{body::Bytes, extract::State, response::Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::AppState;
use crate::chat::models::{Conversation, Message, MessageRole};
use crate::error::AppError;
use crate::providers::{ChatMessage, Provider};

/// Chat turn request
///
/// `message` and `provider` deserialize leniently (missing fields become
/// empty strings) so an incomplete request funnels into the one 400
/// validation response instead of an extractor rejection. The handler
/// parses the raw body itself for the same reason: a wrong-typed field or
/// a missing content-type must produce that 400 too.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// The user's message for this turn
    #[serde(default)]
    pub message: String,
    /// Provider identifier ("openai", "gemini", "openrouter", "github")
    #[serde(default)]
    pub provider: String,
    /// Session-scoped API key supplied by the client
    #[serde(default)]
    pub api_key: Option<String>,
    /// Existing conversation to continue; absent or empty starts a new one
    #[serde(default)]
    pub conversation_id: Option<String>,
}

/// Chat turn response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    /// The conversation this turn ran under (new or resolved)
    pub conversation: Conversation,
    /// The persisted user message
    pub user_message: Message,
    /// The persisted assistant reply
    pub assistant_message: Message,
    /// Raw reply text, same as `assistant_message.content`
    pub response: String,
}

/// Check the request before touching storage or the network
///
/// Collects every failed check so the client sees all problems at once.
fn validate(request: &ChatRequest) -> Result<Provider, AppError> {
    let mut details = Vec::new();

    if request.message.is_empty() {
        details.push("message must contain at least 1 character".to_string());
    }

    match request.provider.parse::<Provider>() {
        Ok(provider) if details.is_empty() => Ok(provider),
        Ok(_) => Err(AppError::Validation { details }),
        Err(e) => {
            details.push(e.to_string());
            Err(AppError::Validation { details })
        }
    }
}

/// Derive a conversation title from its first message
///
/// First 50 characters plus `"..."` when the message is longer. Counted in
/// characters, never splitting a multibyte code point.
fn derive_title(message: &str) -> String {
    let title: String = message.chars().take(50).collect();
    if message.chars().nth(50).is_some() {
        format!("{}...", title)
    } else {
        title
    }
}

/// POST /api/chat - Run one chat turn
///
/// A user message persisted before a downstream failure stays persisted;
/// the turn aborts without the assistant reply.
pub async fn chat(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ChatResponse>, AppError> {
    let request: ChatRequest =
        serde_json::from_slice(&body).map_err(|e| AppError::Validation {
            details: vec![e.to_string()],
        })?;
    let provider = validate(&request)?;

    // Resolve or create the conversation; an empty id means a new one,
    // same as an absent id
    let conversation_id = request
        .conversation_id
        .as_deref()
        .filter(|id| !id.is_empty());
    let conversation = match conversation_id {
        Some(id) => state
            .store
            .get_conversation(id)
            .await?
            .ok_or(AppError::ConversationNotFound)?,
        None => {
            let title = derive_title(&request.message);
            state
                .store
                .create_conversation(title, provider.as_str().to_string(), None)
                .await?
        }
    };

    // Save user message
    let user_message = state
        .store
        .create_message(&conversation.id, MessageRole::User, request.message.clone())
        .await?;

    // Full ordered history, including the message just saved
    let messages = state
        .store
        .get_messages_by_conversation_id(&conversation.id)
        .await?;
    let history: Vec<ChatMessage> = messages
        .iter()
        .map(|m| ChatMessage::new(m.role.clone(), m.content.clone()))
        .collect();

    let reply = state
        .providers
        .generate_response(provider, &history, request.api_key.as_deref())
        .await?;

    // Save assistant reply
    let assistant_message = state
        .store
        .create_message(&conversation.id, MessageRole::Assistant, reply.clone())
        .await?;

    info!(
        conversation_id = %conversation.id,
        provider = %provider,
        history_len = history.len(),
        response_len = reply.len(),
        "Chat turn completed"
    );

    Ok(Json(ChatResponse {
        conversation,
        user_message,
        assistant_message,
        response: reply,
    }))
}
