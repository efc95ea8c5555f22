//! Chat completion parameters.

use std::time::Duration;

use rmai_core::RetryPolicy;

use crate::error::{ModelError, Result};
use crate::prompts::SYSTEM_INSTRUCTION;

/// The default OpenAI API base.
pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Model, sampling and transport settings for [`ChatClient`](crate::ChatClient).
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    pub model: String,
    pub system_instruction: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub base_url: String,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            temperature: 0.8,
            max_tokens: 400,
            base_url: OPENAI_API_BASE.to_string(),
            timeout: Duration::from_secs(60),
            retry: RetryPolicy::default(),
        }
    }
}

impl GenerationConfig {
    pub fn builder() -> GenerationConfigBuilder {
        GenerationConfigBuilder::default()
    }
}

/// Builder for [`GenerationConfig`] with validation on [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct GenerationConfigBuilder {
    config: GenerationConfig,
}

impl GenerationConfigBuilder {
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.config.system_instruction = instruction.into();
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = temperature;
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.config.max_tokens = max_tokens;
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.config.retry = retry;
        self
    }

    /// # Errors
    ///
    /// [`ModelError::ConfigError`] for an empty model name, a temperature
    /// outside `0.0..=2.0` or a zero token limit.
    pub fn build(self) -> Result<GenerationConfig> {
        let config = self.config;
        if config.model.trim().is_empty() {
            return Err(ModelError::ConfigError("model must not be empty".into()));
        }
        if !(0.0..=2.0).contains(&config.temperature) {
            return Err(ModelError::ConfigError(format!(
                "temperature must be within 0.0..=2.0, got {}",
                config.temperature
            )));
        }
        if config.max_tokens == 0 {
            return Err(ModelError::ConfigError("max_tokens must be greater than zero".into()));
        }
        Ok(config)
    }
}
