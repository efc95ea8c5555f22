//! Network-free vectorization: character n-gram TF-IDF reduced by truncated SVD.
//!
//! **Vectors are only comparable within one call.** Vocabulary, IDF weights
//! and the SVD basis are all fitted on the batch being embedded and thrown
//! away afterwards, so the same text embedded in two different batches lands
//! in two unrelated spaces. Anything that compares vectors (a query against
//! its candidates, for instance) has to put every text into the same batch.

use ndarray::Array2;
use tracing::debug;

use crate::config::RagConfig;
use crate::svd::truncated_svd;
use crate::tfidf::{Analyzer, TfidfMatrix};

/// Deterministic fallback embedder.
#[derive(Debug, Clone, Default)]
pub struct LocalEmbedder {
    config: RagConfig,
}

impl LocalEmbedder {
    pub fn new(config: RagConfig) -> Self {
        Self { config }
    }

    /// Embed `texts` into a space fitted on exactly these texts.
    ///
    /// Output vectors are not normalized. Every row has
    /// [`RagConfig::components_for`] entries; texts without any n-gram
    /// (empty or whitespace-only) come back as zero rows.
    pub fn fit_transform(&self, texts: &[&str]) -> Vec<Vec<f64>> {
        let (min_n, max_n) = self.config.ngram_range;
        let analyzer = Analyzer::CharWordBounded { min_n, max_n };
        let matrix = TfidfMatrix::fit_transform(texts, &analyzer, self.config.max_features);

        let n = matrix.n_rows();
        let k = self.config.components_for(n, matrix.n_features());
        debug!(rows = n, features = matrix.n_features(), components = k, "fitting local embedding");

        let mut gram = Array2::<f64>::zeros((n, n));
        for i in 0..n {
            for j in i..n {
                let d = matrix.dot(i, j);
                gram[[i, j]] = d;
                gram[[j, i]] = d;
            }
        }

        truncated_svd(gram, k).outer_iter().map(|row| row.to_vec()).collect()
    }
}
