//! Chat module
//!
//! Conversation and message storage, with in-memory and SQLite backends.

pub mod db;
pub mod memory;
pub mod models;
pub mod store;

pub use db::SqliteStore;
pub use memory::MemoryStore;
pub use models::{Conversation, Message, MessageRole};
pub use store::ConversationStore;
