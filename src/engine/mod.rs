pub mod evaluate;
pub mod lsa;
pub mod tfidf;
pub mod tokenizer;
pub mod vocabulary;

use std::marker::PhantomData;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::evaluate::{feedback, scoring};
use crate::engine::evaluate::scoring::Hits;
use crate::engine::lsa::{DefaultSvdEngine, LatentSemanticProjector, SvdEngine};
use crate::engine::tfidf::{CorpusStats, DefaultTfIdfEngine, TfIdfEngine};
use crate::engine::vocabulary::Vocabulary;
use crate::error::EngineError;

/// Smallest accepted reduction dimension.
pub const MIN_REDUCTION_DIMS: usize = 10;
/// Largest accepted reduction dimension.
pub const MAX_REDUCTION_DIMS: usize = 100;
/// Reduction dimension used until the caller picks one.
pub const DEFAULT_REDUCTION_DIMS: usize = 50;

/// Dimensionality-reduction configuration.
///
/// `dims` is kept within `[MIN_REDUCTION_DIMS, MAX_REDUCTION_DIMS]`; SVD
/// training additionally truncates to the rank available in the corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReductionConfig {
    /// Whether document and query vectors are projected into latent space.
    pub enabled: bool,
    /// Target latent dimension.
    pub dims: usize,
}

impl Default for ReductionConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            dims: DEFAULT_REDUCTION_DIMS,
        }
    }
}

/// One ranked recommendation: document identifier, its raw text, and the
/// similarity score against the query. Ephemeral, produced per ranking call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Position of the document in the corpus.
    pub doc_index: usize,
    /// The raw document text.
    pub text: String,
    /// Cosine similarity against the (possibly refined) query.
    pub score: f64,
}

/// Everything derived from one corpus version. Replaced wholesale on
/// `initialize`; never patched incrementally.
#[derive(Debug, Clone)]
struct CorpusState {
    documents: Vec<String>,
    vocabulary: Vocabulary,
    stats: CorpusStats,
    /// TF-IDF weights, or latent coordinates when reduction is enabled.
    doc_vectors: Vec<Vec<f64>>,
}

impl CorpusState {
    /// Resolve feedback indices to stored document vectors, silently
    /// dropping out-of-range values.
    fn resolve_vectors(&self, indices: &[usize]) -> Vec<&[f64]> {
        indices
            .iter()
            .filter(|&&i| i < self.doc_vectors.len())
            .map(|&i| self.doc_vectors[i].as_slice())
            .collect()
    }

    fn to_recommendations(&self, hits: &Hits) -> Vec<Recommendation> {
        hits.list
            .iter()
            .map(|entry| Recommendation {
                doc_index: entry.doc_index,
                text: self.documents[entry.doc_index].clone(),
                score: entry.score,
            })
            .collect()
    }
}

/// Orchestrator of the full pipeline: tokenization, vocabulary, TF-IDF
/// vectors, optional latent projection, ranking, and relevance feedback.
///
/// Holds exactly one mutable active query; one logical search session per
/// instance. All operations block until complete, and `initialize` /
/// `set_reduction` invalidate every previously derived vector.
///
/// Generic parameters follow the pluggable-engine pattern:
/// - `E`: weighting engine (default `DefaultTfIdfEngine`)
/// - `S`: decomposition engine (default `DefaultSvdEngine`)
#[derive(Debug, Clone)]
pub struct RecommendationEngine<E = DefaultTfIdfEngine, S = DefaultSvdEngine>
where
    E: TfIdfEngine,
    S: SvdEngine,
{
    corpus: Option<CorpusState>,
    projector: LatentSemanticProjector<S>,
    active_query: Option<Vec<f64>>,
    reduction: ReductionConfig,
    _marker: PhantomData<E>,
}

impl<E: TfIdfEngine, S: SvdEngine> Default for RecommendationEngine<E, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: TfIdfEngine, S: SvdEngine> RecommendationEngine<E, S> {
    /// Create an engine with no corpus loaded and reduction disabled.
    pub fn new() -> Self {
        Self {
            corpus: None,
            projector: LatentSemanticProjector::new(),
            active_query: None,
            reduction: ReductionConfig::default(),
            _marker: PhantomData,
        }
    }

    /// Load (or replace) the corpus: tokenize every document, rebuild the
    /// vocabulary and corpus statistics, vectorize every document, and train
    /// and apply the latent projector when reduction is enabled.
    ///
    /// Clears the active query; document index positions become the
    /// permanent identifiers for this corpus version.
    pub fn initialize(&mut self, documents: Vec<String>) {
        let tokenized: Vec<Vec<String>> = documents
            .par_iter()
            .map(|text| tokenizer::tokenize(text))
            .collect();
        let vocabulary = Vocabulary::build(&tokenized);
        let stats = CorpusStats::build::<E>(&tokenized, &vocabulary);
        let mut doc_vectors = tfidf::vectorize_all::<E>(&tokenized, &vocabulary, &stats);

        self.projector.invalidate();
        if self.reduction.enabled {
            self.projector.train(&doc_vectors, self.reduction.dims);
            if let Some(reduced) = self.projector.project_all(&doc_vectors) {
                doc_vectors = reduced;
            }
        }

        log::debug!(
            "corpus initialized: {} documents, {} terms, reduction {}",
            documents.len(),
            vocabulary.len(),
            if self.projector.is_trained() { "on" } else { "off" },
        );
        self.active_query = None;
        self.corpus = Some(CorpusState {
            documents,
            vocabulary,
            stats,
            doc_vectors,
        });
    }

    /// Vectorize the query text, store it as the active query, rank the
    /// whole corpus against it, and return the top `top_n` results.
    ///
    /// A query with no searchable terms returns `Ok(vec![])` without
    /// touching the active query, so an accidental empty search cannot
    /// break an ongoing feedback session. A `top_n` outside
    /// `[1, corpus size]` falls back to [`scoring::DEFAULT_TOP_N`].
    pub fn search(
        &mut self,
        query_text: &str,
        top_n: usize,
    ) -> Result<Vec<Recommendation>, EngineError> {
        let corpus = self.corpus.as_ref().ok_or(EngineError::NotInitialized)?;
        let tokens = tokenizer::tokenize(query_text);
        if tokens.is_empty() {
            return Ok(Vec::new());
        }
        let mut query = tfidf::vectorize::<E>(&tokens, &corpus.vocabulary, &corpus.stats);
        if self.reduction.enabled && self.projector.is_trained() {
            query = self.projector.transform(&query)?;
        }
        let mut hits = scoring::rank(&query, &corpus.doc_vectors);
        hits.truncate(scoring::normalize_top_n(top_n, corpus.documents.len()));
        let results = corpus.to_recommendations(&hits);
        self.active_query = Some(query);
        Ok(results)
    }

    /// Refine the active query from relevance judgments and return the
    /// **full** re-ranked corpus (callers wanting a subset truncate it
    /// themselves).
    ///
    /// Indices are 0-based corpus positions; out-of-range values are
    /// silently dropped. Fails with [`EngineError::NoActiveQuery`] if no
    /// search has succeeded since the last corpus or reduction change.
    pub fn refine(
        &mut self,
        relevant: &[usize],
        non_relevant: &[usize],
    ) -> Result<Vec<Recommendation>, EngineError> {
        let corpus = self.corpus.as_ref().ok_or(EngineError::NotInitialized)?;
        let active = self.active_query.as_deref().ok_or(EngineError::NoActiveQuery)?;

        let relevant_vecs = corpus.resolve_vectors(relevant);
        let non_relevant_vecs = corpus.resolve_vectors(non_relevant);
        log::debug!(
            "refining query: {} relevant, {} non-relevant documents",
            relevant_vecs.len(),
            non_relevant_vecs.len(),
        );

        let query = feedback::optimize_query(active, &relevant_vecs, &non_relevant_vecs);
        let hits = scoring::rank(&query, &corpus.doc_vectors);
        let results = corpus.to_recommendations(&hits);
        self.active_query = Some(query);
        Ok(results)
    }

    /// Update the reduction configuration and rebuild everything from the
    /// retained raw corpus, discarding all prior vectors and the active
    /// query. `dims` is clamped into
    /// `[MIN_REDUCTION_DIMS, MAX_REDUCTION_DIMS]`.
    ///
    /// With no corpus loaded yet, only the configuration is recorded; the
    /// first `initialize` applies it.
    pub fn set_reduction(&mut self, enabled: bool, dims: usize) {
        let dims = dims.clamp(MIN_REDUCTION_DIMS, MAX_REDUCTION_DIMS);
        self.reduction = ReductionConfig { enabled, dims };
        match self.corpus.take() {
            Some(state) => self.initialize(state.documents),
            None => {
                self.projector.invalidate();
                self.active_query = None;
            }
        }
    }

    /// Number of documents in the loaded corpus (0 before `initialize`).
    pub fn doc_count(&self) -> usize {
        self.corpus.as_ref().map_or(0, |c| c.documents.len())
    }

    /// Vocabulary size of the current corpus version.
    pub fn vocab_size(&self) -> usize {
        self.corpus.as_ref().map_or(0, |c| c.vocabulary.len())
    }

    /// Whether a corpus has been loaded.
    pub fn is_initialized(&self) -> bool {
        self.corpus.is_some()
    }

    /// Whether stored vectors currently live in the reduced latent space.
    pub fn is_reduced(&self) -> bool {
        self.reduction.enabled && self.projector.is_trained()
    }

    /// The current reduction configuration.
    pub fn reduction(&self) -> ReductionConfig {
        self.reduction
    }

    /// Read-only view of the active query vector, if a search has run since
    /// the last corpus or reduction change.
    pub fn active_query(&self) -> Option<&[f64]> {
        self.active_query.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> RecommendationEngine {
        RecommendationEngine::new()
    }

    fn corpus() -> Vec<String> {
        vec![
            "cat dog".to_string(),
            "dog bird".to_string(),
            "cat bird fish".to_string(),
        ]
    }

    #[test]
    fn search_before_initialize_fails() {
        let mut e = engine();
        assert_eq!(e.search("cat", 3), Err(EngineError::NotInitialized));
    }

    #[test]
    fn refine_before_initialize_fails() {
        let mut e = engine();
        assert_eq!(e.refine(&[0], &[]), Err(EngineError::NotInitialized));
    }

    #[test]
    fn refine_before_any_search_fails() {
        let mut e = engine();
        e.initialize(corpus());
        assert_eq!(e.refine(&[0], &[]), Err(EngineError::NoActiveQuery));
    }

    #[test]
    fn empty_query_short_circuits_and_keeps_the_active_query() {
        let mut e = engine();
        e.initialize(corpus());
        let results = e.search("cat dog", 3).unwrap();
        assert!(!results.is_empty());
        let active = e.active_query().unwrap().to_vec();

        assert_eq!(e.search("", 3).unwrap(), Vec::new());
        assert_eq!(e.search("!!! 42", 3).unwrap(), Vec::new());
        assert_eq!(e.active_query().unwrap(), active.as_slice());
        // Feedback is still valid against the retained query.
        assert!(e.refine(&[1], &[]).is_ok());
    }

    #[test]
    fn initialize_clears_the_active_query() {
        let mut e = engine();
        e.initialize(corpus());
        e.search("cat dog", 3).unwrap();
        assert!(e.active_query().is_some());

        e.initialize(corpus());
        assert!(e.active_query().is_none());
        assert_eq!(e.refine(&[0], &[]), Err(EngineError::NoActiveQuery));
    }

    #[test]
    fn out_of_range_feedback_indices_are_filtered() {
        let mut e = engine();
        e.initialize(corpus());
        e.search("cat dog", 3).unwrap();
        // Only index 1 is in range; the rest silently drop.
        let results = e.refine(&[1, 99, 1000], &[77]).unwrap();
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn refine_returns_the_full_corpus_ranking() {
        let mut e = engine();
        e.initialize(corpus());
        e.search("cat dog", 1).unwrap();
        let results = e.refine(&[], &[]).unwrap();
        assert_eq!(results.len(), e.doc_count());
    }

    #[test]
    fn set_reduction_before_initialize_only_records_config() {
        let mut e = engine();
        e.set_reduction(true, 20);
        assert!(!e.is_initialized());
        assert_eq!(
            e.reduction(),
            ReductionConfig {
                enabled: true,
                dims: 20
            }
        );

        e.initialize(corpus());
        assert!(e.is_reduced());
    }

    #[test]
    fn set_reduction_clamps_the_dimension() {
        let mut e = engine();
        e.set_reduction(true, 3);
        assert_eq!(e.reduction().dims, MIN_REDUCTION_DIMS);
        e.set_reduction(true, 5000);
        assert_eq!(e.reduction().dims, MAX_REDUCTION_DIMS);
    }

    #[test]
    fn set_reduction_rebuilds_and_invalidates_the_active_query() {
        let mut e = engine();
        e.initialize(corpus());
        e.search("cat dog", 3).unwrap();

        e.set_reduction(true, 50);
        assert!(e.is_initialized());
        assert!(e.is_reduced());
        assert_eq!(e.refine(&[0], &[]), Err(EngineError::NoActiveQuery));
    }

    #[test]
    fn disabled_reduction_keeps_full_dimensionality() {
        let mut e = engine();
        e.initialize(corpus());
        e.search("cat dog", 3).unwrap();
        assert_eq!(e.active_query().unwrap().len(), e.vocab_size());
    }
}
