//! Synchronous completion client for an OpenAI-compatible endpoint.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::config::schema::ModelConfig;

/// Errors from the model inference call.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("API key environment variable '{0}' is not set")]
    MissingApiKey(String),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("Completion request failed: {0}")]
    Transport(String),

    #[error("Provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode provider response: {0}")]
    Decode(String),

    #[error("Provider response contained no completion text")]
    EmptyCompletion,
}

/// A single synchronous completion call. Implementations must be safe to
/// share across concurrent ingestion requests.
pub trait ModelClient: Send + Sync {
    fn complete(&self, prompt: &str) -> Result<String, ModelError>;
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

/// Model client speaking the chat-completions protocol (OpenRouter, OpenAI
/// and compatible providers). Temperature is pinned to 0 — the intent is
/// minimum-variance output, though providers do not guarantee determinism.
#[derive(Debug)]
pub struct HttpModelClient {
    http: reqwest::blocking::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl HttpModelClient {
    /// Builds a client from config, reading the API key from the
    /// environment variable the config names.
    pub fn from_config(config: &ModelConfig) -> Result<Self, ModelError> {
        let api_key = std::env::var(&config.api_key_env)
            .map_err(|_| ModelError::MissingApiKey(config.api_key_env.clone()))?;
        Self::new(
            &config.base_url,
            &config.model,
            api_key,
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn new(
        base_url: &str,
        model: &str,
        api_key: String,
        timeout: Duration,
    ) -> Result<Self, ModelError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ModelError::ClientBuild(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key,
        })
    }
}

impl ModelClient for HttpModelClient {
    fn complete(&self, prompt: &str) -> Result<String, ModelError> {
        let body = serde_json::json!({
            "model": self.model,
            "temperature": 0.0,
            "messages": [
                {"role": "user", "content": prompt}
            ],
        });

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| ModelError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ModelError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .map_err(|e| ModelError::Decode(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .filter(|content| !content.is_empty())
            .ok_or(ModelError::EmptyCompletion)
    }
}
