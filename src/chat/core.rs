//! The question/response cycle shared by the API and the CLI.
use std::sync::{Arc, RwLock};

use thiserror::Error;

use super::db::ConversationRecord;
use crate::api::AppState;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("userQuestion is required")]
    BadRequest,
    #[error("Model service request failed: {0}")]
    Upstream(#[source] anyhow::Error),
    #[error("Failed to persist conversation: {0}")]
    Storage(#[source] anyhow::Error),
}

/// Answer `question` using the recent conversation as context.
///
/// If `model` is in the allow-list it becomes the active model for
/// this and every later request. The exchange is then written to the
/// store and the question is added to the conversation memory. A
/// failed write is logged and the response is returned anyway. When
/// the model call fails nothing is written and the memory is left as
/// it was.
pub async fn respond(
    state: &Arc<RwLock<AppState>>,
    question: Option<&str>,
    model: Option<&str>,
) -> Result<String, ChatError> {
    // Blank questions are rejected but accepted ones are kept exactly
    // as sent
    let question = match question {
        Some(q) if !q.trim().is_empty() => q,
        _ => return Err(ChatError::BadRequest),
    };

    // Snapshot what's needed so the lock isn't held across the
    // network calls below
    let (client, context, store) = {
        let mut shared_state = state.write().expect("Unable to write shared state");
        if let Some(model) = model {
            shared_state.model_client.set_model(model);
        }
        (
            shared_state.model_client.clone(),
            shared_state.memory.context_with(question),
            Arc::clone(&shared_state.store),
        )
    };

    tracing::debug!(
        "Generating response with {} using {} messages of context",
        client.model(),
        context.len()
    );

    let response = client.generate(&context).await.map_err(|e| {
        tracing::error!("Model service error: {}. Root cause: {}", e, e.root_cause());
        ChatError::Upstream(e)
    })?;

    let record = ConversationRecord::new(question, &response);
    if let Err(e) = store.append(&record).await {
        tracing::warn!("{}", ChatError::Storage(e));
    }

    state
        .write()
        .expect("Unable to write shared state")
        .memory
        .append(question);

    Ok(response)
}
