//! Confidence classifier.
//!
//! A hand-tuned additive rubric: cosine similarity, Euclidean distance and
//! embedding variance each contribute points, and the total picks a level.
//! With the default policy the score ranges 0–10.

use crate::policy::{Band, ConfidencePolicy};
use crate::types::ConfidenceLevel;

/// Points for a value that must be strictly above a cutpoint.
fn points_above(value: f32, band: &Band) -> u32 {
    if value > band.top {
        band.top_points
    } else if value > band.mid {
        band.mid_points
    } else if value > band.low {
        band.low_points
    } else {
        0
    }
}

/// Points for a value that must be strictly below a cutpoint.
fn points_below(value: f32, band: &Band) -> u32 {
    if value < band.top {
        band.top_points
    } else if value < band.mid {
        band.mid_points
    } else if value < band.low {
        band.low_points
    } else {
        0
    }
}

/// Raw rubric total for a pair of metrics and the embedding variance.
pub fn score(
    policy: &ConfidencePolicy,
    cosine_similarity: f32,
    euclidean_distance: f32,
    variance: f32,
) -> u32 {
    let variance_points = if variance > policy.variance_high {
        policy.variance_high_points
    } else if variance > policy.variance_low {
        policy.variance_low_points
    } else {
        0
    };

    points_above(cosine_similarity, &policy.cosine)
        + points_below(euclidean_distance, &policy.distance)
        + variance_points
}

/// Map a rubric total to a level.
pub fn level_for_score(policy: &ConfidencePolicy, score: u32) -> ConfidenceLevel {
    if score >= policy.very_high_score {
        ConfidenceLevel::VeryHigh
    } else if score >= policy.high_score {
        ConfidenceLevel::High
    } else if score >= policy.medium_score {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    }
}

/// Classify a comparison into a [`ConfidenceLevel`].
pub fn classify(
    policy: &ConfidencePolicy,
    cosine_similarity: f32,
    euclidean_distance: f32,
    variance: f32,
) -> ConfidenceLevel {
    level_for_score(
        policy,
        score(policy, cosine_similarity, euclidean_distance, variance),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p() -> ConfidencePolicy {
        ConfidencePolicy::default()
    }

    #[test]
    fn test_strong_pair_scores_ten() {
        assert_eq!(score(&p(), 0.95, 0.3, 0.02), 10);
        assert_eq!(classify(&p(), 0.95, 0.3, 0.02), ConfidenceLevel::VeryHigh);
    }

    #[test]
    fn test_borderline_pair_is_medium() {
        assert_eq!(score(&p(), 0.72, 1.3, 0.003), 4);
        assert_eq!(classify(&p(), 0.72, 1.3, 0.003), ConfidenceLevel::Medium);
    }

    #[test]
    fn test_nothing_scores_zero() {
        assert_eq!(score(&p(), 0.1, 2.0, 0.0), 0);
        assert_eq!(classify(&p(), 0.1, 2.0, 0.0), ConfidenceLevel::Low);
    }

    #[test]
    fn test_band_boundaries_are_exclusive() {
        // Exactly on a cutpoint falls into the band below it.
        assert_eq!(points_above(0.90, &p().cosine), 3);
        assert_eq!(points_above(0.80, &p().cosine), 2);
        assert_eq!(points_above(0.70, &p().cosine), 0);
        assert_eq!(points_below(0.5, &p().distance), 3);
        assert_eq!(points_below(1.0, &p().distance), 2);
        assert_eq!(points_below(1.5, &p().distance), 0);
        assert_eq!(score(&p(), 0.0, 9.0, 0.01), 1);
        assert_eq!(score(&p(), 0.0, 9.0, 0.005), 0);
    }

    #[test]
    fn test_score_to_level_cutoffs() {
        let levels: Vec<_> = (0..=10).map(|s| level_for_score(&p(), s)).collect();
        assert_eq!(levels[3], ConfidenceLevel::Low);
        assert_eq!(levels[4], ConfidenceLevel::Medium);
        assert_eq!(levels[5], ConfidenceLevel::Medium);
        assert_eq!(levels[6], ConfidenceLevel::High);
        assert_eq!(levels[7], ConfidenceLevel::High);
        assert_eq!(levels[8], ConfidenceLevel::VeryHigh);
        assert_eq!(levels[10], ConfidenceLevel::VeryHigh);
    }

    #[test]
    fn test_monotonic_in_similarity_and_proximity() {
        let cosines: Vec<f32> = (0..=40).map(|i| -1.0 + i as f32 * 0.05).collect();
        let distances: Vec<f32> = (0..=40).map(|i| i as f32 * 0.05).collect();

        for &variance in &[0.0, 0.007, 0.02] {
            for &d in &distances {
                for pair in cosines.windows(2) {
                    assert!(
                        classify(&p(), pair[0], d, variance) <= classify(&p(), pair[1], d, variance),
                        "cosine {} -> {} at d={d} v={variance}",
                        pair[0],
                        pair[1]
                    );
                }
            }
            for &c in &cosines {
                for pair in distances.windows(2) {
                    // Larger distance never raises confidence.
                    assert!(
                        classify(&p(), c, pair[1], variance) <= classify(&p(), c, pair[0], variance),
                        "distance {} -> {} at c={c} v={variance}",
                        pair[0],
                        pair[1]
                    );
                }
            }
        }
    }

    #[test]
    fn test_custom_policy() {
        let mut policy = p();
        policy.very_high_score = 10;
        assert_eq!(classify(&policy, 0.95, 0.3, 0.007), ConfidenceLevel::High);
    }
}
