//! Error types for the `rmai-model` crate.

use thiserror::Error;

/// Errors raised by the chat client.
///
/// The [`Generator`](crate::Generator) never returns these; it logs them and
/// answers with template text.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("request failed: {0}")]
    Request(String),

    /// Non-2xx response from the API.
    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("gave up after {attempts} attempt(s): {message}")]
    RetriesExhausted { attempts: u32, message: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
