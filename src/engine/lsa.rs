use std::marker::PhantomData;

use nalgebra::{DMatrix, RowDVector};
use rayon::prelude::*;

use crate::error::EngineError;

/// Decomposition capability consumed by the latent semantic projector.
///
/// The projector only owns the truncation, application, and invalidation
/// policy; producing singular vectors is delegated to a linear-algebra
/// collaborator through this trait.
pub trait SvdEngine: Send + Sync {
    /// Right-singular vectors of `matrix` as columns, ordered by descending
    /// singular value. `None` when the decomposition is unavailable for the
    /// given input.
    fn right_singular_vectors(matrix: DMatrix<f64>) -> Option<DMatrix<f64>>;
}

/// Default decomposition backed by nalgebra's SVD.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSvdEngine;

impl SvdEngine for DefaultSvdEngine {
    fn right_singular_vectors(matrix: DMatrix<f64>) -> Option<DMatrix<f64>> {
        // svd() orders singular values descending; v_t is Some because we
        // request it.
        let svd = matrix.svd(false, true);
        svd.v_t.map(|v_t| v_t.transpose())
    }
}

/// Projection of term-space vectors into a reduced latent space.
///
/// `train` learns a terms x k projection from the documents x terms matrix
/// of the current corpus; `transform` right-multiplies a row vector by it.
/// The projection is tied to one corpus version: the engine invalidates it
/// whenever the corpus or the reduction dimension changes.
///
/// When reduction is enabled the projection must be applied uniformly to
/// every stored document vector and every query vector; mixing reduced and
/// unreduced vectors in one similarity computation is a bug.
#[derive(Debug, Clone)]
pub struct LatentSemanticProjector<S = DefaultSvdEngine>
where
    S: SvdEngine,
{
    projection: Option<DMatrix<f64>>,
    _marker: PhantomData<S>,
}

impl<S: SvdEngine> Default for LatentSemanticProjector<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SvdEngine> LatentSemanticProjector<S> {
    /// Create an untrained projector.
    pub fn new() -> Self {
        Self {
            projection: None,
            _marker: PhantomData,
        }
    }

    /// Learn the projection from all current document vectors, keeping the
    /// first `min(k, available columns)` right-singular vectors.
    ///
    /// A corpus with zero documents (or zero terms) leaves the projector
    /// untrained.
    pub fn train(&mut self, doc_vectors: &[Vec<f64>], k: usize) {
        let Some(first) = doc_vectors.first() else {
            return;
        };
        if first.is_empty() {
            return;
        }
        let rows = doc_vectors.len();
        let cols = first.len();
        let matrix = DMatrix::from_fn(rows, cols, |r, c| doc_vectors[r][c]);
        let Some(v) = S::right_singular_vectors(matrix) else {
            return;
        };
        let keep = k.min(v.ncols());
        self.projection = Some(v.columns(0, keep).into_owned());
        log::debug!("latent projector trained: {} terms -> {} dims", cols, keep);
    }

    /// Project a term-space row vector into the latent space.
    pub fn transform(&self, vector: &[f64]) -> Result<Vec<f64>, EngineError> {
        let projection = self.projection.as_ref().ok_or(EngineError::NotTrained)?;
        debug_assert_eq!(
            vector.len(),
            projection.nrows(),
            "Vector dimensionality must match the trained term count."
        );
        let reduced = RowDVector::from_row_slice(vector) * projection;
        Ok(reduced.iter().copied().collect())
    }

    /// Project every vector of a corpus in parallel.
    /// `None` when the projector is untrained.
    pub fn project_all(&self, vectors: &[Vec<f64>]) -> Option<Vec<Vec<f64>>> {
        let projection = self.projection.as_ref()?;
        Some(
            vectors
                .par_iter()
                .map(|v| {
                    let reduced = RowDVector::from_row_slice(v) * projection;
                    reduced.iter().copied().collect()
                })
                .collect(),
        )
    }

    /// Whether `train` has produced a projection for the current corpus.
    #[inline]
    pub fn is_trained(&self) -> bool {
        self.projection.is_some()
    }

    /// Dimensionality of transformed vectors, if trained.
    pub fn output_dims(&self) -> Option<usize> {
        self.projection.as_ref().map(DMatrix::ncols)
    }

    /// Drop the learned projection (corpus or reduction dimension changed).
    pub fn invalidate(&mut self) {
        self.projection = None;
    }
}
