//! Error types for the `rmai-data` crate.

use thiserror::Error;

/// Errors surfaced by the dataset layer.
#[derive(Debug, Error)]
pub enum DataError {
    /// The upstream API kept failing until the retry budget ran out.
    #[error("upstream unavailable after {attempts} attempt(s): {message}")]
    UpstreamUnavailable {
        /// Attempts made for the failing page.
        attempts: u32,
        /// The last failure seen.
        message: String,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// A convenience result type for dataset operations.
pub type Result<T> = std::result::Result<T, DataError>;
