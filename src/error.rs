use thiserror::Error;

/// Errors surfaced by the recommendation engine.
///
/// Every failure is a deterministic precondition violation on the engine's
/// state; there is no I/O and nothing is retried. Invalid feedback indices
/// are filtered rather than raised, and zero-norm similarity is a defined
/// score of `0.0`, so neither appears here.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// An operation was called before any corpus was loaded.
    #[error("no corpus loaded; call initialize first")]
    NotInitialized,
    /// `refine` was called with no active query, i.e. before any successful
    /// search since the last corpus or reduction change.
    #[error("no active query; run a search before refining")]
    NoActiveQuery,
    /// The latent semantic projector was asked to transform a vector before
    /// being trained.
    #[error("latent semantic projector is not trained")]
    NotTrained,
}
