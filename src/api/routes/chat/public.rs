//! Public types for the chat API
use serde::Deserialize;
use serde_json::Value;

/// Fields are kept as raw JSON so a missing or mistyped question can
/// be answered with a 400 and a mistyped model can be ignored, rather
/// than rejecting the whole body.
#[derive(Deserialize, Debug)]
pub struct ChatRequest {
    #[serde(rename = "userQuestion")]
    pub user_question: Option<Value>,
    pub model: Option<Value>,
}

impl ChatRequest {
    /// The question, if it was sent as a string
    pub fn question(&self) -> Option<&str> {
        self.user_question.as_ref().and_then(Value::as_str)
    }

    /// The requested model, if it was sent as a string
    pub fn model(&self) -> Option<&str> {
        self.model.as_ref().and_then(Value::as_str)
    }
}
