//! Chat data models
//!
//! Defines structures for conversations and messages. JSON field names are
//! camelCase because the browser client reads them that way.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Role of a message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message from the user
    User,
    /// Message from the assistant/AI
    Assistant,
    /// System instruction fed to the provider
    System,
}

impl MessageRole {
    /// Convert the role to its string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
            MessageRole::System => "system",
        }
    }
}

impl From<&str> for MessageRole {
    fn from(s: &str) -> Self {
        match s {
            "user" => MessageRole::User,
            "assistant" => MessageRole::Assistant,
            "system" => MessageRole::System,
            _ => MessageRole::User,
        }
    }
}

/// A conversation thread
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    /// Unique identifier for the conversation
    pub id: String,
    /// Owning user, if any (no auth is enforced, so usually null)
    pub user_id: Option<String>,
    /// Title of the conversation (derived from the first message)
    pub title: String,
    /// Provider identifier this thread is pinned to ("openai", "gemini", ...)
    pub provider: String,
    /// When the conversation was created (Unix timestamp)
    pub created_at: i64,
}

impl Conversation {
    /// Create a new conversation
    pub fn new(id: String, title: String, provider: String, user_id: Option<String>) -> Self {
        Self {
            id,
            user_id,
            title,
            provider,
            created_at: Utc::now().timestamp(),
        }
    }
}

/// A single message in a conversation
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique identifier for the message
    pub id: String,
    /// ID of the conversation this message belongs to
    pub conversation_id: String,
    /// Role of the message sender
    pub role: String, // Stored as "user" / "assistant" / "system" in DB
    /// Content of the message
    pub content: String,
    /// When the message was created (Unix timestamp)
    pub timestamp: i64,
}

impl Message {
    /// Create a new message
    pub fn new(id: String, conversation_id: String, role: MessageRole, content: String) -> Self {
        Self {
            id,
            conversation_id,
            role: role.as_str().to_string(),
            content,
            timestamp: Utc::now().timestamp(),
        }
    }

    /// Get the message role as enum
    #[allow(dead_code)]
    pub fn role_enum(&self) -> MessageRole {
        MessageRole::from(self.role.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_strings() {
        for role in [MessageRole::User, MessageRole::Assistant, MessageRole::System] {
            assert_eq!(MessageRole::from(role.as_str()), role);
        }
        // Unknown strings fall back to User rather than failing a read.
        assert_eq!(MessageRole::from("tool"), MessageRole::User);
    }

    #[test]
    fn conversation_serializes_with_camel_case_keys() {
        let conversation = Conversation::new(
            "c1".to_string(),
            "Hello".to_string(),
            "openai".to_string(),
            None,
        );
        let json = serde_json::to_value(&conversation).unwrap();
        assert_eq!(json["id"], "c1");
        assert_eq!(json["userId"], serde_json::Value::Null);
        assert_eq!(json["provider"], "openai");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn message_serializes_with_camel_case_keys() {
        let message = Message::new(
            "m1".to_string(),
            "c1".to_string(),
            MessageRole::Assistant,
            "Hi there!".to_string(),
        );
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["conversationId"], "c1");
        assert_eq!(json["role"], "assistant");
        assert!(json.get("timestamp").is_some());
    }
}
