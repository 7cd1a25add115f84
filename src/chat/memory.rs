//! In-memory conversation store
//!
//! Everything lives in process memory and disappears on restart. Also the
//! store of choice for tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::chat::models::{Conversation, Message, MessageRole};
use crate::chat::store::ConversationStore;
use crate::error::AppError;

/// Conversation store backed by process memory
///
/// A single write lock guards both maps, so appends to different
/// conversations can never interleave halfway.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Default)]
struct Inner {
    conversations: HashMap<String, Conversation>,
    /// Messages per conversation id, in insertion order
    messages: HashMap<String, Vec<Message>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConversationStore for MemoryStore {
    async fn create_conversation(
        &self,
        title: String,
        provider: String,
        user_id: Option<String>,
    ) -> Result<Conversation, AppError> {
        let conversation =
            Conversation::new(Uuid::new_v4().to_string(), title, provider, user_id);

        let mut inner = self.inner.write().await;
        inner.messages.insert(conversation.id.clone(), Vec::new());
        inner
            .conversations
            .insert(conversation.id.clone(), conversation.clone());

        debug!(conversation_id = %conversation.id, "Created conversation");
        Ok(conversation)
    }

    async fn get_conversation(&self, id: &str) -> Result<Option<Conversation>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.conversations.get(id).cloned())
    }

    async fn create_message(
        &self,
        conversation_id: &str,
        role: MessageRole,
        content: String,
    ) -> Result<Message, AppError> {
        let mut inner = self.inner.write().await;
        if !inner.conversations.contains_key(conversation_id) {
            return Err(AppError::ConversationNotFound);
        }

        let message = Message::new(
            Uuid::new_v4().to_string(),
            conversation_id.to_string(),
            role,
            content,
        );
        inner
            .messages
            .entry(conversation_id.to_string())
            .or_default()
            .push(message.clone());

        debug!(
            conversation_id = %conversation_id,
            message_id = %message.id,
            "Appended message"
        );
        Ok(message)
    }

    async fn get_messages_by_conversation_id(
        &self,
        conversation_id: &str,
    ) -> Result<Vec<Message>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .messages
            .get(conversation_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_and_get_conversation() {
        let store = MemoryStore::new();
        let created = store
            .create_conversation("Hello".to_string(), "openai".to_string(), None)
            .await
            .unwrap();

        let fetched = store.get_conversation(&created.id).await.unwrap();
        assert!(fetched.is_some());
        assert_eq!(fetched.unwrap().title, "Hello");

        assert!(store.get_conversation("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn messages_come_back_in_creation_order() {
        let store = MemoryStore::new();
        let conversation = store
            .create_conversation("Test".to_string(), "gemini".to_string(), None)
            .await
            .unwrap();

        for (role, content) in [
            (MessageRole::User, "A"),
            (MessageRole::Assistant, "B"),
            (MessageRole::User, "C"),
        ] {
            store
                .create_message(&conversation.id, role, content.to_string())
                .await
                .unwrap();
        }

        let messages = store
            .get_messages_by_conversation_id(&conversation.id)
            .await
            .unwrap();
        let contents: Vec<&str> = messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["A", "B", "C"]);
        assert_eq!(messages[0].role, "user");
        assert_eq!(messages[1].role, "assistant");
    }

    #[tokio::test]
    async fn message_for_unknown_conversation_is_rejected() {
        let store = MemoryStore::new();
        let result = store
            .create_message("missing", MessageRole::User, "Hi".to_string())
            .await;
        assert!(matches!(result, Err(AppError::ConversationNotFound)));
    }

    #[tokio::test]
    async fn unknown_conversation_has_no_messages() {
        let store = MemoryStore::new();
        let messages = store
            .get_messages_by_conversation_id("missing")
            .await
            .unwrap();
        assert!(messages.is_empty());
    }

    #[tokio::test]
    async fn read_after_write_sees_the_new_message() {
        let store = MemoryStore::new();
        let conversation = store
            .create_conversation("Test".to_string(), "openai".to_string(), None)
            .await
            .unwrap();

        let created = store
            .create_message(&conversation.id, MessageRole::User, "Hi".to_string())
            .await
            .unwrap();
        let messages = store
            .get_messages_by_conversation_id(&conversation.id)
            .await
            .unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].id, created.id);
    }

    #[tokio::test]
    async fn writes_to_different_conversations_do_not_mix() {
        let store = MemoryStore::new();
        let first = store
            .create_conversation("First".to_string(), "openai".to_string(), None)
            .await
            .unwrap();
        let second = store
            .create_conversation("Second".to_string(), "github".to_string(), None)
            .await
            .unwrap();

        store
            .create_message(&first.id, MessageRole::User, "to first".to_string())
            .await
            .unwrap();
        store
            .create_message(&second.id, MessageRole::User, "to second".to_string())
            .await
            .unwrap();

        let first_messages = store
            .get_messages_by_conversation_id(&first.id)
            .await
            .unwrap();
        assert_eq!(first_messages.len(), 1);
        assert_eq!(first_messages[0].content, "to first");
    }
}
