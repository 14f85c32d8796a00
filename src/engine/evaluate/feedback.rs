use crate::utils::math;

/// Weight of the previous query vector.
pub const ALPHA: f64 = 1.0;
/// Weight of the relevant-document centroid.
pub const BETA: f64 = 0.75;
/// Weight of the non-relevant-document centroid.
pub const GAMMA: f64 = 0.15;

/// Rocchio relevance feedback.
///
/// `q' = ALPHA * q0 + BETA * mean(relevant) - GAMMA * mean(non_relevant)`,
/// with negative coordinates clamped to zero afterwards. An empty feedback
/// set omits its term entirely; it is never evaluated as an empty mean.
///
/// All vectors must live in the same space as the query (reduced or not).
/// The caller enforces the "active query exists" precondition.
pub fn optimize_query(original: &[f64], relevant: &[&[f64]], non_relevant: &[&[f64]]) -> Vec<f64> {
    let mut query: Vec<f64> = original.iter().map(|w| ALPHA * w).collect();
    if let Some(centroid) = math::mean(relevant) {
        math::add_scaled(&mut query, &centroid, BETA);
    }
    if let Some(centroid) = math::mean(non_relevant) {
        math::add_scaled(&mut query, &centroid, -GAMMA);
    }
    math::clamp_non_negative(&mut query);
    query
}
