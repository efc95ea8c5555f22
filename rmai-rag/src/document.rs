//! Data types for documents and ranked results.

use serde::{Deserialize, Serialize};

/// A unit of text to be vectorized or ranked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Caller-assigned identifier. Opaque to this crate.
    pub id: String,
    /// The text content of the document.
    pub text: String,
    /// Where the text came from (e.g. a character name). Never read by the ranker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provenance: Option<String>,
}

impl Document {
    /// Create a document without provenance.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self { id: id.into(), text: text.into(), provenance: None }
    }

    /// Attach a provenance tag.
    pub fn with_provenance(mut self, provenance: impl Into<String>) -> Self {
        self.provenance = Some(provenance.into());
        self
    }
}

/// Position of a candidate in the ranked input together with its similarity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RankedResult {
    /// Index into the candidate list passed to the ranker.
    pub index: usize,
    /// Cosine similarity to the query, in `[-1, 1]`.
    pub score: f32,
}

/// A retrieved [`Document`] paired with a relevance score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// The retrieved document.
    pub document: Document,
    /// The similarity score (higher is more relevant).
    pub score: f32,
}
