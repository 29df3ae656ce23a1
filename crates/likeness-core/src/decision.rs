//! Binary match decision and match-type categorization.
//!
//! The two rules are independent of each other and can disagree on the same
//! input; neither is adjusted to agree with the other.

use crate::policy::{CategoryPolicy, CategoryRule, DecisionPolicy};
use crate::types::{ConfidenceLevel, MatchType};

/// Similarity threshold after the quality adjustment.
pub fn adjusted_threshold(policy: &DecisionPolicy, variance: f32) -> f32 {
    let quality_multiplier = if variance > policy.quality_variance {
        1.0
    } else {
        policy.low_quality_multiplier
    };
    policy.base_similarity * quality_multiplier
}

/// Same person or not.
///
/// `confidence` only participates when `use_confidence_in_decision` is set.
pub fn decide(
    policy: &DecisionPolicy,
    cosine_similarity: f32,
    euclidean_distance: f32,
    confidence: ConfidenceLevel,
    variance: f32,
) -> bool {
    let similar = cosine_similarity > adjusted_threshold(policy, variance);
    let close = euclidean_distance < policy.max_distance;
    let confident = !policy.use_confidence_in_decision || confidence >= policy.min_confidence;
    similar && close && confident
}

fn rule_matches(
    rule: &CategoryRule,
    cosine_similarity: f32,
    euclidean_distance: f32,
    confidence: ConfidenceLevel,
) -> bool {
    confidence >= rule.min_confidence
        && cosine_similarity > rule.min_similarity
        && euclidean_distance < rule.max_distance
}

/// Bucket the comparison. First matching rule wins.
pub fn categorize(
    policy: &CategoryPolicy,
    cosine_similarity: f32,
    euclidean_distance: f32,
    confidence: ConfidenceLevel,
) -> MatchType {
    if rule_matches(&policy.high, cosine_similarity, euclidean_distance, confidence) {
        MatchType::SamePersonHighConfidence
    } else if rule_matches(&policy.medium, cosine_similarity, euclidean_distance, confidence) {
        MatchType::SamePersonMediumConfidence
    } else {
        MatchType::DifferentPeople
    }
}
