use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A free-text note attached to one character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub character_id: String,
    /// Name at the time the note was written.
    pub character_name: String,
    pub content: String,
    /// Opaque embedding bytes, if one was computed when the note was added.
    #[serde(skip)]
    pub embedding: Option<Vec<u8>>,
    pub created_at: DateTime<Utc>,
}

/// Pack an embedding as little-endian `f32`s for the `embedding` column.
pub fn encode_embedding(vector: &[f32]) -> Vec<u8> {
    vector.iter().flat_map(|x| x.to_le_bytes()).collect()
}
