use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Term -> vector dimension mapping for one corpus version.
///
/// Terms are the distinct tokens observed across all tokenized documents,
/// assigned dimensions in lexicographic order. Sorting makes the mapping
/// deterministic: two builds over the same corpus always produce identical
/// vector coordinates. The mapping is rebuilt wholesale whenever the corpus
/// changes, never patched in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Vocabulary {
    #[serde(with = "indexmap::map::serde_seq")]
    dims: IndexMap<Box<str>, usize>,
}

impl Vocabulary {
    /// Build the vocabulary from every tokenized document in the corpus.
    pub fn build(tokenized_docs: &[Vec<String>]) -> Self {
        let mut terms: Vec<&str> = tokenized_docs
            .iter()
            .flatten()
            .map(String::as_str)
            .collect();
        terms.sort_unstable();
        terms.dedup();
        let dims = terms
            .into_iter()
            .enumerate()
            .map(|(dim, term)| (Box::from(term), dim))
            .collect();
        Self { dims }
    }

    /// Dimension index of a term, or `None` if it is out of vocabulary.
    #[inline]
    pub fn dim_of(&self, term: &str) -> Option<usize> {
        self.dims.get(term).copied()
    }

    /// Number of distinct terms (the dimensionality of document vectors).
    #[inline]
    pub fn len(&self) -> usize {
        self.dims.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dims.is_empty()
    }

    /// Terms in dimension order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.dims.keys().map(AsRef::as_ref)
    }
}
