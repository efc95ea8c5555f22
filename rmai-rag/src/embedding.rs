//! The text vectorizer: remote embeddings when available, local fallback always.

use tracing::{debug, warn};

use crate::config::RagConfig;
use crate::error::{RagError, Result};
use crate::local::LocalEmbedder;
use crate::openai::OpenAIEmbeddingProvider;

/// Added to every norm before dividing so all-zero vectors stay finite.
const NORM_EPSILON: f64 = 1e-12;

/// Turns batches of text into unit-length vectors of one shared dimension.
///
/// When a remote provider is configured it is tried first. Any failure it
/// reports is logged and answered with the local TF-IDF/SVD embedding instead,
/// so callers only ever see [`RagError::EmptyBatch`].
///
/// Local vectors are fitted per call (see [`crate::local`]): embed a query
/// together with the documents it is compared against.
///
/// # Example
///
/// ```rust,ignore
/// use rmai_rag::Vectorizer;
///
/// let vectorizer = Vectorizer::from_env();
/// let vectors = vectorizer.embed(&["portal gun", "plumbus"]).await?;
/// assert_eq!(vectors[0].len(), vectors[1].len());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Vectorizer {
    remote: Option<OpenAIEmbeddingProvider>,
    local: LocalEmbedder,
}

/// Backend chosen for a single `embed` call.
enum Strategy<'a> {
    Remote(&'a OpenAIEmbeddingProvider),
    Local,
}

impl Vectorizer {
    /// Vectorizer that never leaves the process.
    pub fn local(config: RagConfig) -> Self {
        Self { remote: None, local: LocalEmbedder::new(config) }
    }

    /// Vectorizer that tries `provider` first.
    pub fn with_remote(provider: OpenAIEmbeddingProvider, config: RagConfig) -> Self {
        Self { remote: Some(provider), local: LocalEmbedder::new(config) }
    }

    /// Use OpenAI when `OPENAI_API_KEY` is set, local vectors otherwise.
    pub fn from_env() -> Self {
        match OpenAIEmbeddingProvider::from_env() {
            Ok(provider) => Self::with_remote(provider, RagConfig::default()),
            Err(e) => {
                debug!(error = %e, "no remote embedding provider, using local vectors");
                Self::local(RagConfig::default())
            }
        }
    }

    /// Whether a remote provider is configured.
    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    fn strategy(&self) -> Strategy<'_> {
        match &self.remote {
            Some(provider) => Strategy::Remote(provider),
            None => Strategy::Local,
        }
    }

    /// Embed `texts`, returning one L2-normalized vector per text.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::EmptyBatch`] if `texts` is empty. Nothing else.
    pub async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Err(RagError::EmptyBatch);
        }

        let raw: Vec<Vec<f64>> = match self.strategy() {
            Strategy::Remote(provider) => match provider.embed_batch(texts).await {
                Ok(vectors) => vectors
                    .into_iter()
                    .map(|v| v.into_iter().map(f64::from).collect())
                    .collect(),
                Err(e) => {
                    warn!(error = %e, batch_size = texts.len(), "remote embedding failed, falling back to local vectors");
                    self.local.fit_transform(texts)
                }
            },
            Strategy::Local => self.local.fit_transform(texts),
        };

        Ok(raw.iter().map(|v| normalize(v)).collect())
    }
}

/// Divide by the Euclidean norm (plus a small epsilon).
fn normalize(vector: &[f64]) -> Vec<f32> {
    let norm = vector.iter().map(|x| x * x).sum::<f64>().sqrt() + NORM_EPSILON;
    vector.iter().map(|x| (x / norm) as f32).collect()
}
