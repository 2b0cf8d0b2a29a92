//! Latent semantic analysis sentence ranking.
//!
//! Builds a term-by-sentence matrix over stemmed, stop-word-filtered
//! vocabulary, decomposes it, and scores every sentence by the length of its
//! vector in the singular-value-weighted topic space.

use std::collections::HashMap;

use nalgebra::DMatrix;
use rust_stemmers::{Algorithm, Stemmer};

use crate::error::{Error, Result};

use super::sentences::SentenceSplitter;

/// Common English words excluded from the vocabulary.
pub const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "either", "few",
    "for", "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers",
    "herself", "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its",
    "itself", "just", "may", "me", "might", "more", "most", "must", "my", "myself", "neither",
    "no", "nor", "not", "now", "of", "off", "on", "once", "only", "or", "other", "ought", "our",
    "ours", "ourselves", "out", "over", "own", "same", "shall", "she", "should", "so", "some",
    "such", "than", "that", "the", "their", "theirs", "them", "themselves", "then", "there",
    "these", "they", "this", "those", "through", "to", "too", "under", "until", "up", "us",
    "very", "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom",
    "why", "will", "with", "would", "yet", "you", "your", "yours", "yourself", "yourselves",
];

/// Smoothing applied to per-sentence term frequencies.
const TF_SMOOTHING: f64 = 0.4;

/// Topics always kept in the ranking, however small the matrix.
const MIN_DIMENSIONS: usize = 3;

/// Share of topics kept in the ranking.
const REDUCTION_RATIO: f64 = 1.0;

/// LSA ranker with an English stemmer.
pub struct LsaRanker {
    stemmer: Stemmer,
}

impl LsaRanker {
    /// Create a ranker.
    pub fn new() -> Self {
        Self {
            stemmer: Stemmer::create(Algorithm::English),
        }
    }

    /// Pick the `count` best sentences of `text`, in document order, joined
    /// with single spaces.
    ///
    /// Text with no vocabulary left after filtering yields an empty summary.
    pub fn summarize(&self, splitter: &SentenceSplitter, text: &str, count: usize) -> Result<String> {
        let sentences = splitter.sentences(text);
        let terms: Vec<Vec<String>> = sentences
            .iter()
            .map(|s| self.sentence_terms(splitter, s))
            .collect();

        let dictionary = build_dictionary(&terms);
        if dictionary.is_empty() || count == 0 {
            return Ok(String::new());
        }

        let matrix = term_frequency(&terms, &dictionary);
        let ranks = rank_sentences(matrix)?;
        let best = select_best(&ranks, count);

        Ok(best
            .into_iter()
            .map(|i| sentences[i])
            .collect::<Vec<_>>()
            .join(" "))
    }

    fn sentence_terms(&self, splitter: &SentenceSplitter, sentence: &str) -> Vec<String> {
        splitter
            .words(sentence)
            .into_iter()
            .filter(|w| !STOPWORDS.contains(&w.as_str()))
            .map(|w| self.stemmer.stem(&w).into_owned())
            .collect()
    }
}

impl Default for LsaRanker {
    fn default() -> Self {
        Self::new()
    }
}

/// Assign every distinct term a row, in order of first appearance.
fn build_dictionary(terms: &[Vec<String>]) -> HashMap<&str, usize> {
    let mut dictionary = HashMap::new();
    for term in terms.iter().flatten() {
        let next = dictionary.len();
        dictionary.entry(term.as_str()).or_insert(next);
    }
    dictionary
}

/// Term-by-sentence matrix of smoothed frequencies.
///
/// Each column is normalised by its most frequent term; every cell of a
/// non-empty column, including absent terms, receives the smoothing floor.
fn term_frequency(terms: &[Vec<String>], dictionary: &HashMap<&str, usize>) -> DMatrix<f64> {
    let mut matrix = DMatrix::<f64>::zeros(dictionary.len(), terms.len());

    for (col, sentence) in terms.iter().enumerate() {
        for term in sentence {
            if let Some(&row) = dictionary.get(term.as_str()) {
                matrix[(row, col)] += 1.0;
            }
        }
    }

    for mut column in matrix.column_iter_mut() {
        let max = column.max();
        if max != 0.0 {
            for value in column.iter_mut() {
                *value = TF_SMOOTHING + (1.0 - TF_SMOOTHING) * (*value / max);
            }
        }
    }

    matrix
}

/// Score every sentence (matrix column) from the singular value decomposition.
fn rank_sentences(matrix: DMatrix<f64>) -> Result<Vec<f64>> {
    let sentence_count = matrix.ncols();
    let svd = matrix
        .try_svd(false, true, f64::EPSILON, 0)
        .ok_or_else(|| Error::Summarize("singular value decomposition did not converge".into()))?;
    let v_t = svd
        .v_t
        .ok_or_else(|| Error::Summarize("missing right singular vectors".into()))?;

    let sigma = &svd.singular_values;
    let dimensions = MIN_DIMENSIONS.max((sigma.len() as f64 * REDUCTION_RATIO) as usize);
    let powered: Vec<f64> = sigma
        .iter()
        .enumerate()
        .map(|(i, s)| if i < dimensions { s * s } else { 0.0 })
        .collect();

    Ok((0..sentence_count)
        .map(|j| {
            powered
                .iter()
                .enumerate()
                .map(|(i, s)| s * v_t[(i, j)].powi(2))
                .sum::<f64>()
                .sqrt()
        })
        .collect())
}

/// Indices of the `count` highest ranks, ties broken by position, returned
/// in ascending order.
fn select_best(ranks: &[f64], count: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..ranks.len()).collect();
    order.sort_by(|&a, &b| ranks[b].total_cmp(&ranks[a]));
    order.truncate(count);
    order.sort_unstable();
    order
}
