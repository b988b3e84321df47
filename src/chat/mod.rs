mod core;
pub mod db;
pub mod memory;

pub use self::core::{ChatError, respond};
pub use db::{ConversationRecord, ConversationStore, SqliteConversationStore};
pub use memory::ConversationMemory;
