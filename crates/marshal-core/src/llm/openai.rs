//! OpenAI-compatible chat completions client

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;

use super::{LanguageModel, LlmError};

/// Connection settings for an OpenAI-compatible endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    /// Endpoint root; `/v1/chat/completions` is appended
    pub base_url: String,
    pub model: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    /// Request timeout enforced by the HTTP client
    pub timeout: Duration,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            model: "gpt-4o".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout: Duration::from_secs(120),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

/// Chat completions client. One request per invocation, no retries.
pub struct OpenAiClient {
    model: String,
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenAiClient {
    /// Creates a client, reading the API key from the configured
    /// environment variable.
    pub fn from_config(config: &ModelConfig) -> Result<Self, LlmError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| LlmError::MissingApiKey(config.api_key_env.clone()))?;
        Self::with_api_key(config, api_key)
    }

    pub fn with_api_key(config: &ModelConfig, api_key: impl Into<String>) -> Result<Self, LlmError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(LlmError::Network)?;

        Ok(Self {
            model: config.model.clone(),
            api_key: api_key.into(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn build_request_body(&self, prompt: &str) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "user", "content": prompt }
            ],
        })
    }
}

/// Pulls the first choice's text out of a chat completions response.
fn first_choice_content(response: ChatResponse) -> Result<String, LlmError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| LlmError::InvalidResponse("response contained no message content".to_string()))
}

#[async_trait]
impl LanguageModel for OpenAiClient {
    async fn invoke(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        debug!("Invoking model {} at {url}", self.model);

        let response = self
            .http
            .post(url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&self.build_request_body(prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body: ChatResponse = response.json().await?;
        first_choice_content(body)
    }
}
