//! Sparse TF-IDF weighting fitted on a single batch of texts.
//!
//! A [`TfidfMatrix`] is a throwaway vector space: vocabulary and IDF weights
//! come from the batch it was fitted on and mean nothing outside it.

use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use regex::Regex;

/// Runs of two or more word characters.
static WORD_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("valid word token pattern"));

/// How a text is cut into terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Analyzer {
    /// Character n-grams taken inside whitespace-delimited words, each word
    /// padded with one space on either side. Robust to typos and inflection.
    CharWordBounded { min_n: usize, max_n: usize },
    /// Lowercased words of at least two word characters.
    Word,
}

impl Analyzer {
    /// Terms of `text` in order of appearance, duplicates included.
    pub fn terms(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        match *self {
            Analyzer::CharWordBounded { min_n, max_n } => char_wb_ngrams(&lower, min_n, max_n),
            Analyzer::Word => {
                WORD_TOKEN.find_iter(&lower).map(|m| m.as_str().to_string()).collect()
            }
        }
    }
}

fn char_wb_ngrams(text: &str, min_n: usize, max_n: usize) -> Vec<String> {
    let mut ngrams = Vec::new();
    for word in text.split_whitespace() {
        let padded: Vec<char> =
            std::iter::once(' ').chain(word.chars()).chain(std::iter::once(' ')).collect();
        let len = padded.len();
        for n in min_n.max(1)..=max_n {
            if len <= n {
                // a short word counts once, however many sizes it is short for
                ngrams.push(padded.iter().collect());
                break;
            }
            for window in padded.windows(n) {
                ngrams.push(window.iter().collect());
            }
        }
    }
    ngrams
}

/// Row-normalized TF-IDF matrix stored as sorted sparse rows.
#[derive(Debug, Clone)]
pub struct TfidfMatrix {
    rows: Vec<Vec<(usize, f64)>>,
    vocabulary: Vec<String>,
}

impl TfidfMatrix {
    /// Fit vocabulary and IDF on `texts` and weight them.
    ///
    /// Keeps at most `max_features` terms, preferring the most frequent across
    /// the batch (ties broken lexicographically). IDF is smoothed:
    /// `ln((1 + n) / (1 + df)) + 1`. Each row is scaled to unit L2 norm; rows
    /// with no terms stay empty.
    pub fn fit_transform(texts: &[&str], analyzer: &Analyzer, max_features: usize) -> Self {
        let counted: Vec<BTreeMap<String, usize>> = texts
            .iter()
            .map(|text| {
                let mut counts = BTreeMap::new();
                for term in analyzer.terms(text) {
                    *counts.entry(term).or_insert(0) += 1;
                }
                counts
            })
            .collect();

        let mut corpus_counts: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
        for counts in &counted {
            for (term, count) in counts {
                let entry = corpus_counts.entry(term.as_str()).or_insert((0, 0));
                entry.0 += count;
                entry.1 += 1;
            }
        }

        let mut ranked: Vec<(&str, (usize, usize))> = corpus_counts.into_iter().collect();
        if ranked.len() > max_features {
            ranked.sort_by(|a, b| b.1.0.cmp(&a.1.0).then_with(|| a.0.cmp(b.0)));
            ranked.truncate(max_features);
            ranked.sort_by(|a, b| a.0.cmp(b.0));
        }

        let n = texts.len() as f64;
        let vocabulary: Vec<String> = ranked.iter().map(|(term, _)| term.to_string()).collect();
        let idf: Vec<f64> =
            ranked.iter().map(|(_, (_, df))| ((1.0 + n) / (1.0 + *df as f64)).ln() + 1.0).collect();
        let column: HashMap<&str, usize> =
            vocabulary.iter().enumerate().map(|(i, term)| (term.as_str(), i)).collect();

        let rows = counted
            .iter()
            .map(|counts| {
                let mut row: Vec<(usize, f64)> = counts
                    .iter()
                    .filter_map(|(term, count)| {
                        column.get(term.as_str()).map(|&j| (j, *count as f64 * idf[j]))
                    })
                    .collect();
                row.sort_by_key(|(j, _)| *j);
                let norm = row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
                if norm > 0.0 {
                    row.iter_mut().for_each(|(_, w)| *w /= norm);
                }
                row
            })
            .collect();

        Self { rows, vocabulary }
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_features(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Sparse row `i` as `(column, weight)` pairs sorted by column.
    pub fn row(&self, i: usize) -> &[(usize, f64)] {
        &self.rows[i]
    }

    /// Inner product of rows `i` and `j`.
    pub fn dot(&self, i: usize, j: usize) -> f64 {
        sparse_dot(&self.rows[i], &self.rows[j])
    }

    /// Cosine similarity of rows `i` and `j`; 0.0 when either row is empty.
    pub fn cosine(&self, i: usize, j: usize) -> f64 {
        if self.rows[i].is_empty() || self.rows[j].is_empty() {
            return 0.0;
        }
        // rows are already unit length
        self.dot(i, j)
    }
}

fn sparse_dot(a: &[(usize, f64)], b: &[(usize, f64)]) -> f64 {
    let (mut i, mut j, mut sum) = (0, 0, 0.0);
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                sum += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    sum
}
