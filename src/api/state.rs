use std::sync::Arc;

use anyhow::{Context, Result};

use crate::chat::{ConversationMemory, ConversationStore, SqliteConversationStore};
use crate::core::{AppConfig, db::migrated_db};
use crate::groq::ModelClient;

pub struct AppState {
    // Holds the active model, shared by every request
    pub model_client: ModelClient,
    // Most recent questions, used as context for the next one
    pub memory: ConversationMemory,
    pub store: Arc<dyn ConversationStore>,
}

impl AppState {
    pub fn new(
        model_client: ModelClient,
        memory: ConversationMemory,
        store: Arc<dyn ConversationStore>,
    ) -> Self {
        Self {
            model_client,
            memory,
            store,
        }
    }

    /// Connect to the conversation database and seed the conversation
    /// memory from what's already stored.
    pub async fn from_config(config: &AppConfig) -> Result<Self> {
        let db = migrated_db(&config.db_path)
            .await
            .with_context(|| format!("Failed to open conversation db {}", config.db_path))?;
        let store = SqliteConversationStore::new(db);
        let history = store
            .fetch_all_questions()
            .await
            .context("Failed to load conversation history")?;
        tracing::debug!("Loaded {} questions from conversation history", history.len());

        let memory = ConversationMemory::initialize(config.memory_size, history);
        let model_client = ModelClient::from_config(config);

        Ok(Self::new(model_client, memory, Arc::new(store)))
    }
}
