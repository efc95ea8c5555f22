//! The four scoring axes. Every function returns a value in `[0, 1]`.

use std::collections::HashSet;

use rmai_rag::{Analyzer, TfidfMatrix};

/// Vocabulary cap for the grounding space. Two short texts never reach it.
const GROUNDING_MAX_FEATURES: usize = 5_000;

/// Below this many tokens lexical variety says nothing.
const MIN_CREATIVITY_TOKENS: usize = 10;

/// Share of fact tokens mentioned in `text`.
///
/// Hits are case-insensitive substring matches, divided by
/// `max(3, tokens.len())` so that a sheet with one or two facts cannot score
/// full marks. Blank text scores 0.0; with no facts to check the score is a
/// neutral 0.5.
pub fn consistency(text: &str, fact_tokens: &[&str]) -> f64 {
    if text.trim().is_empty() {
        return 0.0;
    }
    if fact_tokens.is_empty() {
        return 0.5;
    }
    let hits = count_mentions(text, fact_tokens);
    (hits as f64 / fact_tokens.len().max(3) as f64).min(1.0)
}

/// Lexical variety of `text`.
///
/// Tokens are whitespace-separated words made only of alphanumeric
/// characters. Fewer than ten tokens score 0.4. Otherwise the type-token ratio
/// is mapped through `0.6 + 0.8 * (ttr - 0.4)` and clamped, saturating before
/// all-unique text.
pub fn creativity(text: &str) -> f64 {
    let tokens: Vec<&str> = text
        .split_whitespace()
        .filter(|token| token.chars().all(char::is_alphanumeric))
        .collect();
    if tokens.len() < MIN_CREATIVITY_TOKENS {
        return 0.4;
    }
    let distinct: HashSet<&str> = tokens.iter().copied().collect();
    let ttr = distinct.len() as f64 / tokens.len() as f64;
    (0.6 + 0.8 * (ttr - 0.4)).clamp(0.0, 1.0)
}

/// Share of required keywords mentioned in `text`; 1.0 when none are required.
pub fn completeness(text: &str, keywords: &[&str]) -> f64 {
    if keywords.is_empty() {
        return 1.0;
    }
    let hits = count_mentions(text, keywords);
    (hits as f64 / keywords.len() as f64).min(1.0)
}

/// Word-level TF-IDF cosine between `text` and `reference`.
///
/// The vector space is fitted on these two strings only and never touches a
/// remote service. Scores are clamped to `[0, 1]`; a side without any word
/// scores 0.0.
pub fn grounding(text: &str, reference: &str) -> f64 {
    let matrix =
        TfidfMatrix::fit_transform(&[text, reference], &Analyzer::Word, GROUNDING_MAX_FEATURES);
    matrix.cosine(0, 1).clamp(0.0, 1.0)
}

fn count_mentions(text: &str, needles: &[&str]) -> usize {
    let haystack = text.to_lowercase();
    needles.iter().filter(|needle| haystack.contains(&needle.to_lowercase())).count()
}
