//! Vector math over raw `f32` slices.
//!
//! Pairwise functions assume equal-length inputs; [`FaceMatcher`](crate::FaceMatcher)
//! validates lengths before calling into this module.

/// Narrow an f64 accumulator back to f32, saturating at the finite range
/// instead of overflowing to infinity.
pub(crate) fn saturate(value: f64) -> f32 {
    value.clamp(f32::MIN as f64, f32::MAX as f64) as f32
}

/// Sum of elementwise products.
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "dot: length mismatch");
    saturate(dot_f64(a, b))
}

fn dot_f64(a: &[f32], b: &[f32]) -> f64 {
    a.iter().zip(b.iter()).map(|(&x, &y)| x as f64 * y as f64).sum()
}

pub(crate) fn l2_norm_f64(a: &[f32]) -> f64 {
    a.iter().map(|&x| x as f64 * x as f64).sum::<f64>().sqrt()
}

/// Euclidean (L2) norm.
pub fn l2_norm(a: &[f32]) -> f32 {
    saturate(l2_norm_f64(a))
}

/// Cosine similarity in [-1, 1].
///
/// Returns 0.0 when either vector has zero norm instead of dividing by zero.
/// Accumulates in f64, so any finite f32 input yields a finite result.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "cosine_similarity: length mismatch");
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for (&x, &y) in a.iter().zip(b.iter()) {
        let (x, y) = (x as f64, y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a > 0.0 && norm_b > 0.0 {
        (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0) as f32
    } else {
        0.0
    }
}

/// Straight-line distance between two vectors.
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "euclidean_distance: length mismatch");
    let sum_sq: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(&x, &y)| (x as f64 - y as f64).powi(2))
        .sum();
    saturate(sum_sq.sqrt())
}

/// Population variance of a vector's own components.
///
/// Used as a cheap proxy for embedding informativeness. Empty input yields 0.0.
pub fn population_variance(a: &[f32]) -> f32 {
    if a.is_empty() {
        return 0.0;
    }
    let n = a.len() as f64;
    let mean = a.iter().map(|&x| x as f64).sum::<f64>() / n;
    let sum_sq: f64 = a.iter().map(|&x| (x as f64 - mean).powi(2)).sum();
    saturate(sum_sq / n)
}
