//! Error types for the `rmai-notes` crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NoteError {
    /// Note content was empty or whitespace only.
    #[error("note content is empty")]
    EmptyContent,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("failed to prepare database location: {0}")]
    Io(#[from] std::io::Error),

    /// A stored timestamp is not valid RFC 3339.
    #[error("invalid timestamp in note {id}: {value}")]
    InvalidTimestamp { id: i64, value: String },
}

pub type Result<T> = std::result::Result<T, NoteError>;
