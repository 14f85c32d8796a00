/// Dot product of two dense vectors.
#[inline]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(
        a.len(),
        b.len(),
        "Vectors must be of the same length to compute dot product."
    );
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Euclidean (L2) norm of a dense vector.
#[inline]
pub fn norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// `acc += factor * v`, element-wise.
#[inline]
pub fn add_scaled(acc: &mut [f64], v: &[f64], factor: f64) {
    debug_assert_eq!(
        acc.len(),
        v.len(),
        "Vectors must be of the same length to accumulate."
    );
    for (a, x) in acc.iter_mut().zip(v) {
        *a += factor * x;
    }
}

/// Component-wise mean of a set of equally sized vectors.
/// Returns `None` for an empty set, so callers can skip the term instead of
/// evaluating an undefined empty mean.
pub fn mean(vectors: &[&[f64]]) -> Option<Vec<f64>> {
    let first = vectors.first()?;
    let mut acc = vec![0.0; first.len()];
    for v in vectors {
        add_scaled(&mut acc, v, 1.0);
    }
    let inv = 1.0 / vectors.len() as f64;
    for a in &mut acc {
        *a *= inv;
    }
    Some(acc)
}

/// Clamp every negative coordinate to zero, in place.
#[inline]
pub fn clamp_non_negative(v: &mut [f64]) {
    for x in v.iter_mut() {
        if *x < 0.0 {
            *x = 0.0;
        }
    }
}
