//! L2 normalization of raw model output.

use crate::math::l2_norm_f64;
use crate::types::{Embedding, NormalizedEmbedding};

/// Norms at or below this are treated as zero.
pub const NORM_EPSILON: f32 = 1e-12;

/// Scale an embedding to unit length.
///
/// Vectors whose norm does not exceed [`NORM_EPSILON`] come back as the
/// all-zero vector of the same length, never as `inf`/`NaN`.
pub fn normalize(embedding: &Embedding) -> NormalizedEmbedding {
    NormalizedEmbedding::from_parts(
        normalize_values(&embedding.values),
        embedding.model_version.clone(),
    )
}

/// Slice form of [`normalize`].
pub fn normalize_values(values: &[f32]) -> Vec<f32> {
    let norm = l2_norm_f64(values);
    if norm > NORM_EPSILON as f64 {
        values.iter().map(|&v| (v as f64 / norm) as f32).collect()
    } else {
        vec![0.0; values.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::l2_norm;

    fn norm_of(n: &NormalizedEmbedding) -> f32 {
        l2_norm(n.values())
    }

    #[test]
    fn test_unit_norm() {
        let inputs = [
            vec![3.0, 4.0],
            vec![0.001, -0.002, 0.0005],
            vec![120.0; 512],
            (0..128).map(|i| (i as f32 * 0.37).sin()).collect::<Vec<_>>(),
        ];
        for values in inputs {
            let n = normalize(&Embedding::new(values));
            assert!((norm_of(&n) - 1.0).abs() < 1e-5, "norm {}", norm_of(&n));
        }
    }

    #[test]
    fn test_zero_vector_stays_zero() {
        let n = normalize(&Embedding::new(vec![0.0; 8]));
        assert_eq!(n.dimension(), 8);
        assert!(n.is_zero());
        assert!(n.values().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_tiny_norm_becomes_zero() {
        // norm ≈ 1.4e-13, below the epsilon
        let n = normalize(&Embedding::new(vec![1e-13, 1e-13]));
        assert!(n.is_zero());
    }

    #[test]
    fn test_large_finite_values_normalize() {
        // Summing these squares in f32 would overflow.
        let n = normalize_values(&[1e20, 1e20, -1e20, 5e19]);
        assert!((l2_norm(&n) - 1.0).abs() < 1e-5);
        assert!(n[2] < 0.0);
        assert!((n[0] - n[1]).abs() < 1e-7);
    }

    #[test]
    fn test_small_norm_above_epsilon_normalizes() {
        // norm ≈ 2.2e-12, just above the epsilon.
        let n = normalize_values(&[1e-12, 2e-12]);
        assert!((l2_norm(&n) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_idempotent() {
        let once = normalize(&Embedding::new(vec![0.4, -2.0, 7.5, 0.01]));
        let twice = normalize(&once.clone().into_embedding());
        for (a, b) in once.values().iter().zip(twice.values()) {
            assert!((a - b).abs() < 1e-6, "{a} vs {b}");
        }
    }

    #[test]
    fn test_keeps_model_version() {
        let e = Embedding::new(vec![1.0, 1.0]).with_model_version("facenet-512");
        assert_eq!(normalize(&e).model_version(), Some("facenet-512"));
    }

    #[test]
    fn test_preserves_direction() {
        let n = normalize_values(&[3.0, 4.0]);
        assert!((n[0] - 0.6).abs() < 1e-6);
        assert!((n[1] - 0.8).abs() < 1e-6);
    }
}
