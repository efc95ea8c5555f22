//! Configuration for local vectorization and ranking.

use serde::{Deserialize, Serialize};

use crate::error::{RagError, Result};

/// Parameters of the local TF-IDF/SVD vectorizer and the ranker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RagConfig {
    /// Number of top results returned by search.
    pub top_k: usize,
    /// Inclusive range of character n-gram lengths.
    pub ngram_range: (usize, usize),
    /// Vocabulary cap: only the most frequent n-grams of a batch are kept.
    pub max_features: usize,
    /// Lower bound on the reduced dimension.
    pub min_components: usize,
    /// Upper bound on the reduced dimension.
    pub max_components: usize,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            top_k: 10,
            ngram_range: (3, 5),
            max_features: 20_000,
            min_components: 16,
            max_components: 256,
        }
    }
}

impl RagConfig {
    /// Create a new builder for constructing a [`RagConfig`].
    pub fn builder() -> RagConfigBuilder {
        RagConfigBuilder::default()
    }

    /// Reduced dimension for a batch of `rows` texts over `features` n-grams.
    ///
    /// `min(max_components, max(min_components, min(rows, features) - 1))`.
    pub fn components_for(&self, rows: usize, features: usize) -> usize {
        let rank_bound = rows.min(features).saturating_sub(1);
        rank_bound.max(self.min_components).min(self.max_components)
    }
}

/// Builder for constructing a validated [`RagConfig`].
#[derive(Debug, Clone, Default)]
pub struct RagConfigBuilder {
    config: RagConfig,
}

impl RagConfigBuilder {
    /// Set the number of top results to return from search.
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Set the inclusive character n-gram length range.
    pub fn ngram_range(mut self, min_n: usize, max_n: usize) -> Self {
        self.config.ngram_range = (min_n, max_n);
        self
    }

    /// Set the vocabulary cap.
    pub fn max_features(mut self, max_features: usize) -> Self {
        self.config.max_features = max_features;
        self
    }

    /// Set the bounds of the reduced dimension.
    pub fn components(mut self, min: usize, max: usize) -> Self {
        self.config.min_components = min;
        self.config.max_components = max;
        self
    }

    /// Build the [`RagConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if:
    /// - `top_k == 0`
    /// - the n-gram range is empty or starts at zero
    /// - `max_features == 0`
    /// - `min_components` is zero or greater than `max_components`
    pub fn build(self) -> Result<RagConfig> {
        let config = self.config;
        if config.top_k == 0 {
            return Err(RagError::ConfigError("top_k must be greater than zero".to_string()));
        }
        let (min_n, max_n) = config.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(RagError::ConfigError(format!(
                "invalid ngram_range ({min_n}, {max_n}): need 1 <= min <= max"
            )));
        }
        if config.max_features == 0 {
            return Err(RagError::ConfigError("max_features must be greater than zero".to_string()));
        }
        if config.min_components == 0 || config.min_components > config.max_components {
            return Err(RagError::ConfigError(format!(
                "min_components ({}) must be in 1..={}",
                config.min_components, config.max_components
            )));
        }
        Ok(config)
    }
}
