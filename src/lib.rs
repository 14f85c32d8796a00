//! A vector-space recommendation engine: TF-IDF weighting, optional latent
//! semantic analysis, cosine ranking, and Rocchio relevance feedback over a
//! small in-memory corpus.
pub mod engine;
pub mod error;
pub mod utils;

/// Recommendation Engine
/// The top-level struct of this crate, orchestrating the full retrieval
/// pipeline: it tokenizes a raw corpus, builds a deterministic vocabulary,
/// converts documents and queries into TF-IDF vectors, optionally projects
/// them into a reduced latent space, ranks by cosine similarity, and refines
/// the query from relevance judgments.
///
/// Internally, it holds:
/// - The raw corpus (index position is the document identifier)
/// - The vocabulary and cached corpus statistics
/// - Dense document vectors (TF-IDF weights or latent coordinates)
/// - The latent semantic projector, when reduction is enabled
/// - The single mutable active query vector
///
/// `RecommendationEngine<E, S>` has the following generic parameters:
/// - `E`: weighting engine type (e.g. `DefaultTfIdfEngine`)
/// - `S`: decomposition engine type (e.g. `DefaultSvdEngine`)
///
/// The engine is synchronous and single-session: one active query per
/// instance, and callers sharing an instance must serialize access.
pub use engine::RecommendationEngine;

/// Ranked result tuple: document index, raw text, and similarity score.
pub use engine::Recommendation;

/// Dimensionality-reduction configuration (enable flag plus target
/// dimension, bounded to a sane range).
pub use engine::ReductionConfig;

/// Error taxonomy for the engine's preconditions.
/// All failures are deterministic given the same state and inputs:
/// - `NotInitialized`: operation before any corpus load
/// - `NoActiveQuery`: refine before any search
/// - `NotTrained`: projection transform before training
pub use error::EngineError;

/// TF-IDF Weighting Engine Trait
/// A trait that defines the term-frequency and inverse-document-frequency
/// formulas used to build document and query vectors.
///
/// By implementing this trait, you can plug a different weighting strategy
/// into `RecommendationEngine<E, S>`. The default implementation,
/// `DefaultTfIdfEngine`, performs textbook TF-IDF calculation with
/// Laplace-smoothed IDF over true document frequencies.
pub use engine::tfidf::{DefaultTfIdfEngine, TfIdfEngine};

/// Latent Semantic Projector and its decomposition seam
/// `LatentSemanticProjector` learns a reduced-dimension projection from the
/// corpus matrix via singular value decomposition and projects any vector
/// into that space. The decomposition itself is supplied by an `SvdEngine`
/// collaborator; `DefaultSvdEngine` delegates to nalgebra.
pub use engine::lsa::{DefaultSvdEngine, LatentSemanticProjector, SvdEngine};

/// Deterministic term -> dimension mapping for one corpus version.
pub use engine::vocabulary::Vocabulary;

/// Search Hits and Hit Entry structures
/// Data structures for managing ranked results.
/// - `Hits`: the full ranking, sorted by descending score with ascending
///   document-index tie-breaking
/// - `HitEntry`: a single entry, containing the document index and score
pub use engine::evaluate::scoring::{HitEntry, Hits};
