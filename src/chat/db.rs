//! SQLite-backed conversation store
//!
//! Handles all database interactions for conversations and messages.

use std::path::PathBuf;
use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::chat::models::{Conversation, Message, MessageRole};
use crate::chat::store::ConversationStore;
use crate::error::AppError;

/// Database connection pool for chat operations
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Initialize database connection pool
    ///
    /// # Arguments
    /// * `db_path` - Path to the SQLite database file
    ///
    /// # Returns
    /// * `Ok(SqliteStore)` if successful
    /// * `Err(AppError)` if connection failed
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        // Ensure parent directory exists
        if let Some(parent) = PathBuf::from(db_path).parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::Internal(anyhow::anyhow!("Failed to create db directory: {}", e))
            })?;
        }

        // SQLite connection string format: sqlite://path/to/db.db
        let connection_string = if db_path.starts_with("sqlite:") {
            db_path.to_string()
        } else {
            format!("sqlite:{}", db_path)
        };

        let options = SqliteConnectOptions::from_str(&connection_string)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid database path: {}", e)))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| {
                AppError::Internal(anyhow::anyhow!("Failed to connect to database: {}", e))
            })?;

        info!("Connected to SQLite database at: {}", db_path);

        let store = Self { pool };
        store.run_migrations().await?;

        Ok(store)
    }

    /// Run database migrations
    async fn run_migrations(&self) -> Result<(), AppError> {
        info!("Running database migrations...");

        // Read migration file
        let migration_sql = include_str!("../../migrations/001_create_chats.sql");

        // Remove comments (lines starting with --) and normalize whitespace
        let mut cleaned_sql = String::new();
        for line in migration_sql.lines() {
            let trimmed = line.trim();
            // Skip empty lines and comment-only lines
            if trimmed.is_empty() || trimmed.starts_with("--") {
                continue;
            }
            // Remove inline comments (everything after --)
            let without_comments = if let Some(comment_pos) = trimmed.find("--") {
                &trimmed[..comment_pos]
            } else {
                trimmed
            };
            cleaned_sql.push_str(without_comments.trim());
            cleaned_sql.push(' ');
        }

        // Split by semicolon and filter out empty statements
        let statements: Vec<&str> = cleaned_sql
            .split(';')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect();

        // Execute each statement separately
        for statement in statements {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::Internal(anyhow::anyhow!(
                        "Migration failed: {} - Statement: {}",
                        e,
                        statement.chars().take(100).collect::<String>()
                    ))
                })?;
        }

        info!("Database migrations completed successfully");
        Ok(())
    }

    /// Get the database pool (for advanced operations if needed)
    #[allow(dead_code)]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl ConversationStore for SqliteStore {
    async fn create_conversation(
        &self,
        title: String,
        provider: String,
        user_id: Option<String>,
    ) -> Result<Conversation, AppError> {
        let conversation =
            Conversation::new(Uuid::new_v4().to_string(), title, provider, user_id);

        sqlx::query(
            "INSERT INTO conversations (id, user_id, title, provider, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&conversation.id)
        .bind(&conversation.user_id)
        .bind(&conversation.title)
        .bind(&conversation.provider)
        .bind(conversation.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to create conversation: {}", e)))?;

        debug!("Created conversation: {}", conversation.id);
        Ok(conversation)
    }

    async fn get_conversation(&self, id: &str) -> Result<Option<Conversation>, AppError> {
        let conversation = sqlx::query_as::<_, Conversation>(
            "SELECT id, user_id, title, provider, created_at FROM conversations WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to fetch conversation: {}", e)))?;

        Ok(conversation)
    }

    async fn create_message(
        &self,
        conversation_id: &str,
        role: MessageRole,
        content: String,
    ) -> Result<Message, AppError> {
        // Reject unknown conversations up front rather than relying on the
        // foreign key, so callers get a 404 instead of a 500.
        if self.get_conversation(conversation_id).await?.is_none() {
            return Err(AppError::ConversationNotFound);
        }

        let message = Message::new(
            Uuid::new_v4().to_string(),
            conversation_id.to_string(),
            role,
            content,
        );

        sqlx::query(
            "INSERT INTO messages (id, conversation_id, role, content, timestamp) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&message.id)
        .bind(&message.conversation_id)
        .bind(&message.role)
        .bind(&message.content)
        .bind(message.timestamp)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to add message: {}", e)))?;

        debug!(
            "Added message {} to conversation {}",
            message.id, message.conversation_id
        );
        Ok(message)
    }

    async fn get_messages_by_conversation_id(
        &self,
        conversation_id: &str,
    ) -> Result<Vec<Message>, AppError> {
        // rowid breaks ties between messages created within the same second
        let messages = sqlx::query_as::<_, Message>(
            "SELECT id, conversation_id, role, content, timestamp FROM messages WHERE conversation_id = ? ORDER BY timestamp ASC, rowid ASC"
        )
        .bind(conversation_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to fetch messages: {}", e)))?;

        Ok(messages)
    }
}
