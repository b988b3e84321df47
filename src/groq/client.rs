use std::time::Duration;

use anyhow::{Error, Result, anyhow};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::core::AppConfig;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub enum Role {
    #[serde(rename = "system")]
    System,
    #[serde(rename = "user")]
    User,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Message {
    role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Self {
        Message {
            role,
            content: content.to_string(),
        }
    }
}

/// Request a chat completion from an OpenAI compatible API such as
/// Groq's. Returns the raw response body. Non-success statuses are
/// turned into errors.
pub async fn completion(
    messages: &[Message],
    api_hostname: &str,
    api_key: &str,
    model: &str,
) -> Result<Value, Error> {
    let payload = json!({
        "model": model,
        "messages": messages,
    });
    let url = format!("{}/v1/chat/completions", api_hostname.trim_end_matches("/"));
    let response = reqwest::Client::new()
        .post(url)
        .bearer_auth(api_key)
        .header("Content-Type", "application/json")
        .timeout(Duration::from_secs(60 * 10))
        .json(&payload)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    Ok(response)
}

/// Client for the remote completion service. Holds the currently
/// selected model, which can only be switched to one of the
/// `allowed_models`.
#[derive(Clone, Debug)]
pub struct ModelClient {
    api_hostname: String,
    api_key: String,
    model: String,
    allowed_models: Vec<String>,
    system_message: String,
}

impl ModelClient {
    pub fn new(
        api_hostname: &str,
        api_key: &str,
        model: &str,
        allowed_models: &[String],
        system_message: &str,
    ) -> Self {
        Self {
            api_hostname: api_hostname.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            allowed_models: allowed_models.to_vec(),
            system_message: system_message.to_string(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.groq_api_hostname,
            &config.groq_api_key,
            &config.groq_model,
            &config.allowed_models,
            &config.system_message,
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Switch the active model. Names that aren't in the allow-list
    /// are ignored and the current model is kept. Returns whether the
    /// name was accepted.
    pub fn set_model(&mut self, name: &str) -> bool {
        if !self.allowed_models.iter().any(|m| m == name) {
            tracing::debug!("Ignoring unrecognized model: {}", name);
            return false;
        }
        if self.model != name {
            tracing::info!("Switching model from {} to {}", self.model, name);
            self.model = name.to_string();
        }
        true
    }

    /// Build the transcript sent to the model: the system message
    /// followed by each question in `context`, oldest first.
    pub fn messages(&self, context: &[String]) -> Vec<Message> {
        let mut messages = vec![Message::new(Role::System, &self.system_message)];
        messages.extend(context.iter().map(|q| Message::new(Role::User, q)));
        messages
    }

    /// Generate the next response for the given context. Errors are
    /// returned as is, nothing is retried.
    pub async fn generate(&self, context: &[String]) -> Result<String, Error> {
        let messages = self.messages(context);
        let resp = completion(&messages, &self.api_hostname, &self.api_key, &self.model).await?;

        resp["choices"][0]["message"]["content"]
            .as_str()
            .map(String::from)
            .ok_or(anyhow!("No message received. Resp:\n\n {}", resp))
    }
}
