//! Test utilities for integration tests
#![allow(dead_code)]

use std::sync::{Arc, RwLock};

use anyhow::{Error, anyhow};
use async_trait::async_trait;
use axum::{Router, body::Body, http::Request, response::Response};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::util::ServiceExt;

use groqchat::api::AppState;
use groqchat::api::app;
use groqchat::chat::{
    ConversationMemory, ConversationRecord, ConversationStore, SqliteConversationStore,
};
use groqchat::core::db::migrated_db;
use groqchat::groq::ModelClient;

pub const SYSTEM_MESSAGE: &str = "You are a helpful assistant.";
pub const DEFAULT_MODEL: &str = "mixtral-8x7b-32768";
pub const OTHER_MODEL: &str = "llama2-70b-4096";

/// Everything a test needs to drive the API: the router, the state
/// behind it, a mock model service and the directory holding the
/// database. The directory is removed when this is dropped.
pub struct TestApp {
    pub router: Router,
    pub state: Arc<RwLock<AppState>>,
    pub server: mockito::ServerGuard,
    _dir: TempDir,
}

/// Creates a test application with an empty conversation database in
/// a temporary directory and a model client pointed at a mock server.
pub async fn test_app() -> TestApp {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = dir.path().join("test.db");
    let db = migrated_db(db_path.to_str().unwrap())
        .await
        .expect("Failed to connect to async db");

    let server = mockito::Server::new_async().await;
    let model_client = ModelClient::new(
        &server.url(),
        "test-api-key",
        DEFAULT_MODEL,
        &[DEFAULT_MODEL.to_string(), OTHER_MODEL.to_string()],
        SYSTEM_MESSAGE,
    );

    let app_state = AppState::new(
        model_client,
        ConversationMemory::new(5),
        Arc::new(SqliteConversationStore::new(db)),
    );
    let state = Arc::new(RwLock::new(app_state));

    TestApp {
        router: app(Arc::clone(&state)),
        state,
        server,
        _dir: dir,
    }
}

impl TestApp {
    /// POST a JSON body to the chat endpoint
    pub async fn post_chat(&self, body: Value) -> Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/chat")
                    .method("POST")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    pub fn memory(&self) -> Vec<String> {
        self.state.read().unwrap().memory.context()
    }

    pub fn model(&self) -> String {
        self.state.read().unwrap().model_client.model().to_string()
    }

    pub async fn stored_records(&self) -> Vec<ConversationRecord> {
        let store = Arc::clone(&self.state.read().unwrap().store);
        store.fetch_recent(1000).await.unwrap()
    }
}

/// A chat completion response with `content` as the assistant message
pub fn completion_body(content: &str) -> String {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1694268190,
        "model": DEFAULT_MODEL,
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": content
            },
            "finish_reason": "stop"
        }]
    })
    .to_string()
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Store that fails every operation
pub struct FailingStore;

#[async_trait]
impl ConversationStore for FailingStore {
    async fn fetch_all_questions(&self) -> Result<Vec<String>, Error> {
        Err(anyhow!("Connection refused"))
    }

    async fn fetch_recent(&self, _limit: usize) -> Result<Vec<ConversationRecord>, Error> {
        Err(anyhow!("Connection refused"))
    }

    async fn append(&self, _record: &ConversationRecord) -> Result<(), Error> {
        Err(anyhow!("Connection refused"))
    }
}
