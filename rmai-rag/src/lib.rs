//! # rmai-rag
//!
//! Vectorization and similarity ranking for notes, character descriptors and
//! generated prose.
//!
//! ## Overview
//!
//! - [`Vectorizer`] turns a batch of texts into unit-length vectors. It calls
//!   the OpenAI embeddings API when a key is configured and silently falls back
//!   to a local character n-gram TF-IDF reduced by truncated SVD.
//! - [`rank`] and [`rank_documents`] order candidates by cosine similarity to
//!   a query, embedding everything in one batch.
//! - [`TfidfMatrix`] is the sparse weighting both the local embedder and the
//!   grounding scorer in `rmai-eval` are built on.
//!
//! Local vectors live in a space fitted on the batch that produced them and
//! cannot be compared with vectors from another call.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rmai_rag::{Vectorizer, rank};
//!
//! let vectorizer = Vectorizer::from_env();
//! let ranked = rank(&vectorizer, "portal gun", &["Rick built a portal gun", "Morty is scared"], 1).await?;
//! assert_eq!(ranked[0].index, 0);
//! ```

pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod local;
pub mod openai;
pub mod ranker;
pub mod svd;
pub mod tfidf;

pub use config::{RagConfig, RagConfigBuilder};
pub use document::{Document, RankedResult, SearchResult};
pub use embedding::Vectorizer;
pub use error::{RagError, Result};
pub use local::LocalEmbedder;
pub use openai::OpenAIEmbeddingProvider;
pub use ranker::{cosine_similarity, rank, rank_documents};
pub use tfidf::{Analyzer, TfidfMatrix};
