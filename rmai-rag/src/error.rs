//! Error types for the `rmai-rag` crate.

use thiserror::Error;

/// Errors that can occur while vectorizing or ranking text.
#[derive(Debug, Error)]
pub enum RagError {
    /// `embed` was called with no texts.
    #[error("cannot embed an empty batch")]
    EmptyBatch,

    /// A remote embedding provider failed.
    ///
    /// Only produced by providers themselves; the [`Vectorizer`](crate::Vectorizer)
    /// converts it into a fallback to local vectorization.
    #[error("Embedding error ({provider}): {message}")]
    EmbeddingError {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// A convenience result type for vectorization and ranking.
pub type Result<T> = std::result::Result<T, RagError>;
