//! Conversation read endpoints
//!
//! Handles HTTP requests for fetching conversations and their messages.

use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::api::AppState;
use crate::chat::models::{Conversation, Message};
use crate::error::AppError;

/// GET /api/conversations/:id - Fetch a single conversation
pub async fn get_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Conversation>, AppError> {
    let conversation = state
        .store
        .get_conversation(&id)
        .await?
        .ok_or(AppError::ConversationNotFound)?;

    Ok(Json(conversation))
}

/// GET /api/conversations/:id/messages - Fetch a conversation's messages
///
/// Unknown conversation ids yield an empty list, not a 404.
pub async fn get_messages(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Message>>, AppError> {
    let messages = state.store.get_messages_by_conversation_id(&id).await?;

    Ok(Json(messages))
}
