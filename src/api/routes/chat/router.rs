//! Router for the chat API

use std::sync::{Arc, RwLock};

use axum::{Json, Router, extract::State, routing::post};

use super::public;
use crate::api::state::AppState;
use crate::chat::respond;

type SharedState = Arc<RwLock<AppState>>;

/// Answer a question and return the model output as is
async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<public::ChatRequest>,
) -> Result<Json<String>, crate::api::public::ApiError> {
    let response = respond(&state, payload.question(), payload.model()).await?;

    Ok(Json(response))
}

/// Create the chat router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", post(chat_handler))
}
