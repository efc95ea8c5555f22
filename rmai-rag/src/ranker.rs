//! Similarity ranking of candidate texts against a query.

use tracing::debug;

use crate::document::{Document, RankedResult, SearchResult};
use crate::embedding::Vectorizer;
use crate::error::{RagError, Result};

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 if either vector has zero magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Rank `documents` by similarity to `query`.
///
/// The query and all documents are embedded in a single [`Vectorizer::embed`]
/// call, so local fallback vectors share one space. Results are ordered by
/// descending score; equal scores keep their input order. At most `top_k`
/// results are returned, and none at all when `documents` is empty.
///
/// # Errors
///
/// Returns [`RagError::ConfigError`] if `top_k` is zero.
pub async fn rank(
    vectorizer: &Vectorizer,
    query: &str,
    documents: &[&str],
    top_k: usize,
) -> Result<Vec<RankedResult>> {
    if top_k == 0 {
        return Err(RagError::ConfigError("top_k must be greater than zero".to_string()));
    }
    if documents.is_empty() {
        return Ok(Vec::new());
    }

    let mut batch = Vec::with_capacity(documents.len() + 1);
    batch.push(query);
    batch.extend_from_slice(documents);

    let vectors = vectorizer.embed(&batch).await?;
    let (query_vector, document_vectors) = vectors.split_first().ok_or(RagError::EmptyBatch)?;

    let mut scored: Vec<RankedResult> = document_vectors
        .iter()
        .enumerate()
        .map(|(index, vector)| RankedResult {
            index,
            score: cosine_similarity(query_vector, vector).clamp(-1.0, 1.0),
        })
        .collect();

    sort_descending(&mut scored);
    scored.truncate(top_k);

    debug!(candidates = documents.len(), returned = scored.len(), "ranked documents");
    Ok(scored)
}

/// Stable sort by descending score: ties keep ascending index order.
fn sort_descending(results: &mut [RankedResult]) {
    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
}

/// [`rank`] over [`Document`]s, returning the documents with their scores.
pub async fn rank_documents(
    vectorizer: &Vectorizer,
    query: &str,
    documents: &[Document],
    top_k: usize,
) -> Result<Vec<SearchResult>> {
    let texts: Vec<&str> = documents.iter().map(|d| d.text.as_str()).collect();
    let ranked = rank(vectorizer, query, &texts, top_k).await?;
    Ok(ranked
        .into_iter()
        .map(|r| SearchResult { document: documents[r.index].clone(), score: r.score })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosine_of_zero_vector_is_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
        assert!((cosine_similarity(&[1.0, 1.0], &[2.0, 2.0]) - 1.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn zero_top_k_is_rejected() {
        let result = rank(&Vectorizer::default(), "q", &["a"], 0).await;
        assert!(matches!(result, Err(RagError::ConfigError(_))));
    }

    #[test]
    fn ties_keep_input_order() {
        let mut results: Vec<RankedResult> = [0.2, 0.9, 0.2, 0.9, 0.5]
            .iter()
            .enumerate()
            .map(|(index, &score)| RankedResult { index, score })
            .collect();
        sort_descending(&mut results);
        let indices: Vec<usize> = results.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![1, 3, 4, 0, 2]);
    }

    #[tokio::test]
    async fn empty_candidates_return_nothing() {
        let ranked = rank(&Vectorizer::default(), "anything", &[], 5).await.unwrap();
        assert!(ranked.is_empty());
    }
}
