//! Conversation store contract
//!
//! Persistence is pluggable behind this trait: the HTTP layer only ever sees
//! an `Arc<dyn ConversationStore>`. `MemoryStore` keeps history in process
//! memory, `SqliteStore` persists it to disk; both enforce the same rules.

use crate::chat::models::{Conversation, Message, MessageRole};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage operations needed by the chat endpoints
///
/// Messages are append-only and a conversation's messages replayed in
/// creation order are exactly the prompt context for its next turn. No
/// update or delete operations exist at this layer.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Allocate an identifier and store a new conversation
    async fn create_conversation(
        &self,
        title: String,
        provider: String,
        user_id: Option<String>,
    ) -> Result<Conversation, AppError>;

    /// Look up a conversation by identifier
    async fn get_conversation(&self, id: &str) -> Result<Option<Conversation>, AppError>;

    /// Append a message to an existing conversation
    ///
    /// Fails with [`AppError::ConversationNotFound`] when the conversation
    /// does not exist, so a message can never reference a missing thread.
    async fn create_message(
        &self,
        conversation_id: &str,
        role: MessageRole,
        content: String,
    ) -> Result<Message, AppError>;

    /// All messages for a conversation, oldest first
    ///
    /// Returns an empty list for conversations without messages and for
    /// unknown conversation ids alike.
    async fn get_messages_by_conversation_id(
        &self,
        conversation_id: &str,
    ) -> Result<Vec<Message>, AppError>;
}
