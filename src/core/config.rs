use std::env;

use anyhow::{Context, Result, bail};

pub const DEFAULT_MODEL: &str = "mixtral-8x7b-32768";
pub const DEFAULT_ALLOWED_MODELS: &[&str] = &["mixtral-8x7b-32768", "llama2-70b-4096"];
pub const DEFAULT_MEMORY_SIZE: usize = 5;
pub const DEFAULT_SYSTEM_MESSAGE: &str = "The following is a friendly conversation between a human and an AI. The AI is talkative and provides lots of specific details from its context. If the AI does not know the answer to a question, it truthfully says it does not know.";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub db_path: String,
    pub groq_api_hostname: String,
    pub groq_api_key: String,
    pub groq_model: String,
    pub allowed_models: Vec<String>,
    pub memory_size: usize,
    pub system_message: String,
}

impl AppConfig {
    /// Read the configuration from the environment. Called once at
    /// startup, changes to the environment after that are not seen.
    pub fn from_env() -> Result<Self> {
        let groq_api_key = env::var("GROQ_API_KEY").context("Missing env var GROQ_API_KEY")?;
        let db_path = env::var("GROQCHAT_DB_PATH").unwrap_or_else(|_| "./groqchat.db".to_string());
        let groq_api_hostname = env::var("GROQCHAT_API_HOST")
            .unwrap_or_else(|_| "https://api.groq.com/openai".to_string());
        let groq_model = env::var("GROQCHAT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let allowed_models = match env::var("GROQCHAT_ALLOWED_MODELS") {
            Ok(models) => parse_model_list(&models),
            Err(_) => DEFAULT_ALLOWED_MODELS.iter().map(|m| m.to_string()).collect(),
        };
        let memory_size = match env::var("GROQCHAT_MEMORY_SIZE") {
            Ok(size) => parse_memory_size(&size)?,
            Err(_) => DEFAULT_MEMORY_SIZE,
        };
        let system_message = env::var("GROQCHAT_SYSTEM_MESSAGE")
            .unwrap_or_else(|_| DEFAULT_SYSTEM_MESSAGE.to_string());

        Ok(Self::new(
            db_path,
            groq_api_hostname,
            groq_api_key,
            groq_model,
            allowed_models,
            memory_size,
            system_message,
        ))
    }

    /// Build a config, making sure the default model is always part
    /// of the allow-list.
    pub fn new(
        db_path: String,
        groq_api_hostname: String,
        groq_api_key: String,
        groq_model: String,
        mut allowed_models: Vec<String>,
        memory_size: usize,
        system_message: String,
    ) -> Self {
        if !allowed_models.contains(&groq_model) {
            allowed_models.push(groq_model.clone());
        }
        Self {
            db_path,
            groq_api_hostname,
            groq_api_key,
            groq_model,
            allowed_models,
            memory_size,
            system_message,
        }
    }
}

fn parse_model_list(models: &str) -> Vec<String> {
    models
        .split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(String::from)
        .collect()
}

fn parse_memory_size(size: &str) -> Result<usize> {
    let size: usize = size
        .trim()
        .parse()
        .with_context(|| format!("Invalid GROQCHAT_MEMORY_SIZE: {}", size))?;
    if size == 0 {
        bail!("GROQCHAT_MEMORY_SIZE must be at least 1");
    }
    Ok(size)
}
