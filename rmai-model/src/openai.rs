//! Minimal OpenAI chat-completions client.

use rmai_core::retry;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::config::GenerationConfig;
use crate::error::{ModelError, Result};

/// Sends one system + user exchange to `/chat/completions` and returns the
/// assistant's reply, retrying failed requests per the configured policy.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    api_key: String,
    config: GenerationConfig,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

impl ChatClient {
    pub fn new(api_key: impl Into<String>, config: GenerationConfig) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(ModelError::ConfigError("API key must not be empty".into()));
        }
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ModelError::ConfigError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http, api_key, config })
    }

    /// Client keyed by the `OPENAI_API_KEY` environment variable.
    pub fn from_env(config: GenerationConfig) -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            ModelError::ConfigError("OPENAI_API_KEY environment variable not set".into())
        })?;
        Self::new(api_key, config)
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Reply to `prompt`. A reply with no text content is returned as `""`.
    ///
    /// # Errors
    ///
    /// [`ModelError::RetriesExhausted`] once every attempt has failed.
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        debug!(provider = "OpenAI", model = %self.config.model, "requesting chat completion");
        retry(&self.config.retry, "chat_completion", |_| self.complete_once(prompt))
            .await
            .map_err(|exhausted| ModelError::RetriesExhausted {
                attempts: exhausted.attempts,
                message: exhausted.last_error.to_string(),
            })
    }

    async fn complete_once(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage { role: "system", content: &self.config.system_instruction },
                ChatMessage { role: "user", content: prompt },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(provider = "OpenAI", error = %e, "request failed");
                ModelError::Request(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            error!(provider = "OpenAI", %status, "API error");
            return Err(ModelError::Api { status: status.as_u16(), message });
        }

        let reply: ChatResponse = response
            .json()
            .await
            .map_err(|e| ModelError::InvalidResponse(format!("failed to parse response: {e}")))?;
        let choice = reply
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ModelError::InvalidResponse("response has no choices".into()))?;
        Ok(choice.message.content.unwrap_or_default())
    }
}
