use std::fmt::Debug;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::utils::math;

/// Result count substituted when the requested top-n is outside
/// `[1, corpus size]`.
pub const DEFAULT_TOP_N: usize = 5;

/// A single ranked document: corpus index and similarity score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitEntry {
    /// Position of the document in the corpus (its permanent identifier).
    pub doc_index: usize,
    /// Cosine similarity against the query vector.
    pub score: f64,
}

/// Ranked list of search results.
pub struct Hits {
    /// Entries in descending score order, ties broken by ascending index.
    pub list: Vec<HitEntry>,
}

impl Hits {
    /// Sort by descending score; equal scores keep ascending document order
    /// so ranking is a total, deterministic order.
    pub fn sort_by_score(&mut self) -> &mut Self {
        self.list.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then(a.doc_index.cmp(&b.doc_index))
        });
        self
    }

    /// Keep at most the first `n` entries.
    pub fn truncate(&mut self, n: usize) -> &mut Self {
        self.list.truncate(n);
        self
    }
}

impl Debug for Hits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            writeln!(f, "Hits [")?;
            for entry in &self.list {
                writeln!(f, "    {}: {:.6}", entry.doc_index, entry.score)?;
            }
            write!(f, "]")
        } else {
            f.debug_list().entries(&self.list).finish()
        }
    }
}

/// Cosine similarity of two dense vectors.
///
/// If either vector has zero norm (no weighted terms, or no overlap with the
/// vocabulary) the score is defined as `0.0`. The check is explicit rather
/// than a side effect of floating-point division.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let norm_a = math::norm(a);
    let norm_b = math::norm(b);
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    math::dot(a, b) / (norm_a * norm_b)
}

/// Score every corpus document against the query vector and return the full
/// ranking. Scoring runs in parallel across documents; the order of the
/// result is deterministic regardless.
pub fn rank(query: &[f64], doc_vectors: &[Vec<f64>]) -> Hits {
    let list: Vec<HitEntry> = doc_vectors
        .par_iter()
        .enumerate()
        .map(|(doc_index, doc)| HitEntry {
            doc_index,
            score: cosine_similarity(query, doc),
        })
        .collect();
    let mut hits = Hits { list };
    hits.sort_by_score();
    hits
}

/// Clamp a requested result count into the supported range, substituting
/// [`DEFAULT_TOP_N`] when it falls outside `[1, corpus_size]`.
pub fn normalize_top_n(requested: usize, corpus_size: usize) -> usize {
    if requested == 0 || requested > corpus_size {
        DEFAULT_TOP_N
    } else {
        requested
    }
}
