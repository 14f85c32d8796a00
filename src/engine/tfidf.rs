use std::collections::{HashMap, HashSet};

use rayon::prelude::*;

use crate::engine::vocabulary::Vocabulary;

/// Weighting formulas used to build document and query vectors.
///
/// Implementing this trait plugs a different weighting scheme into
/// `RecommendationEngine<E>`. `DefaultTfIdfEngine` performs textbook
/// TF-IDF with Laplace-smoothed IDF.
pub trait TfIdfEngine: Send + Sync {
    /// Term frequency of a term occurring `count` times in a document of
    /// `doc_len` tokens.
    fn tf(count: usize, doc_len: usize) -> f64;

    /// Inverse document frequency of a term contained in `doc_freq` of the
    /// corpus's `doc_count` documents.
    fn idf(doc_count: usize, doc_freq: usize) -> f64;
}

/// Textbook TF-IDF:
/// `tf = count / doc_len`, `idf = ln((N + 1) / (df + 1))`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTfIdfEngine;

impl TfIdfEngine for DefaultTfIdfEngine {
    #[inline]
    fn tf(count: usize, doc_len: usize) -> f64 {
        if doc_len == 0 {
            return 0.0;
        }
        count as f64 / doc_len as f64
    }

    #[inline]
    fn idf(doc_count: usize, doc_freq: usize) -> f64 {
        ((doc_count as f64 + 1.0) / (doc_freq as f64 + 1.0)).ln()
    }
}

/// Corpus-wide statistics backing vectorization, with a cached IDF vector.
///
/// `doc_freq[dim]` counts the *documents* containing the term at dimension
/// `dim` at least once. This is document frequency proper, not the raw
/// occurrence count; the two diverge whenever a term repeats within one
/// document.
#[derive(Debug, Clone, Default)]
pub struct CorpusStats {
    /// Number of documents in the corpus.
    pub doc_count: usize,
    /// Per-dimension document frequency.
    pub doc_freq: Vec<usize>,
    /// Per-dimension IDF, cached at build time.
    pub idf: Vec<f64>,
}

impl CorpusStats {
    /// Compute document frequencies and the IDF cache for one corpus version.
    pub fn build<E: TfIdfEngine>(tokenized_docs: &[Vec<String>], vocab: &Vocabulary) -> Self {
        let mut doc_freq = vec![0usize; vocab.len()];
        for doc in tokenized_docs {
            let unique: HashSet<&str> = doc.iter().map(String::as_str).collect();
            for term in unique {
                if let Some(dim) = vocab.dim_of(term) {
                    doc_freq[dim] += 1;
                }
            }
        }
        let idf = doc_freq
            .iter()
            .map(|&df| E::idf(tokenized_docs.len(), df))
            .collect();
        Self {
            doc_count: tokenized_docs.len(),
            doc_freq,
            idf,
        }
    }
}

/// Map a token sequence (document or query) to a dense weighted vector over
/// the fixed vocabulary, using the current corpus statistics.
///
/// Out-of-vocabulary tokens contribute no dimension. Queries go through the
/// same statistics as documents; there is no separate "query corpus".
pub fn vectorize<E: TfIdfEngine>(
    tokens: &[String],
    vocab: &Vocabulary,
    stats: &CorpusStats,
) -> Vec<f64> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for token in tokens {
        *counts.entry(token.as_str()).or_insert(0) += 1;
    }
    let mut vector = vec![0.0; vocab.len()];
    for (term, count) in counts {
        if let Some(dim) = vocab.dim_of(term) {
            vector[dim] = E::tf(count, tokens.len()) * stats.idf[dim];
        }
    }
    vector
}

/// Vectorize every document of the corpus in parallel.
pub fn vectorize_all<E: TfIdfEngine>(
    tokenized_docs: &[Vec<String>],
    vocab: &Vocabulary,
    stats: &CorpusStats,
) -> Vec<Vec<f64>> {
    tokenized_docs
        .par_iter()
        .map(|doc| vectorize::<E>(doc, vocab, stats))
        .collect()
}
