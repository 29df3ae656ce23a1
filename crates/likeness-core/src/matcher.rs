//! Matching facade: validates a pair of embeddings and runs the metrics,
//! classifier, decider and categorizer over it.

use crate::confidence;
use crate::decision;
use crate::error::MatchError;
use crate::math;
use crate::policy::{MatchPolicy, QualitySource};
use crate::types::{Embedding, MatchResult};

/// Stateless comparator holding a [`MatchPolicy`].
///
/// Cheap to copy and safe to share across threads; every call reads only
/// its arguments.
#[derive(Debug, Clone, Copy, Default)]
pub struct FaceMatcher {
    policy: MatchPolicy,
}

impl FaceMatcher {
    pub fn new(policy: MatchPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &MatchPolicy {
        &self.policy
    }

    /// Compare two embeddings as given.
    ///
    /// No normalization happens here; callers are expected to pass
    /// normalized vectors (the rubric was tuned on unit-length embeddings).
    pub fn compare(&self, embedding1: &[f32], embedding2: &[f32]) -> Result<MatchResult, MatchError> {
        validate(embedding1, embedding2)?;

        let cosine_similarity = math::cosine_similarity(embedding1, embedding2);
        let euclidean_distance = math::euclidean_distance(embedding1, embedding2);
        let variance = match self.policy.quality_source {
            QualitySource::First => math::population_variance(embedding1),
            QualitySource::Mean => {
                (math::population_variance(embedding1) + math::population_variance(embedding2))
                    / 2.0
            }
        };

        let confidence = confidence::classify(
            &self.policy.confidence,
            cosine_similarity,
            euclidean_distance,
            variance,
        );
        let is_match = decision::decide(
            &self.policy.decision,
            cosine_similarity,
            euclidean_distance,
            confidence,
            variance,
        );
        let match_type = decision::categorize(
            &self.policy.category,
            cosine_similarity,
            euclidean_distance,
            confidence,
        );

        tracing::debug!(
            dim = embedding1.len(),
            cosine = cosine_similarity,
            distance = euclidean_distance,
            variance,
            %confidence,
            is_match,
            %match_type,
            "compared embeddings"
        );

        Ok(MatchResult {
            cosine_similarity,
            euclidean_distance,
            composite_similarity: cosine_similarity,
            confidence,
            is_match,
            match_type,
            quality_score: variance,
        })
    }

    /// Compare two [`Embedding`]s, also rejecting pairs labelled with
    /// different model versions.
    pub fn compare_embeddings(
        &self,
        embedding1: &Embedding,
        embedding2: &Embedding,
    ) -> Result<MatchResult, MatchError> {
        if let (Some(left), Some(right)) = (&embedding1.model_version, &embedding2.model_version) {
            if left != right {
                return Err(MatchError::ModelMismatch {
                    left: left.clone(),
                    right: right.clone(),
                });
            }
        }
        self.compare(&embedding1.values, &embedding2.values)
    }
}

/// Compare two embeddings with the default policy.
pub fn compare_embeddings(embedding1: &[f32], embedding2: &[f32]) -> Result<MatchResult, MatchError> {
    FaceMatcher::default().compare(embedding1, embedding2)
}

fn validate(embedding1: &[f32], embedding2: &[f32]) -> Result<(), MatchError> {
    if embedding1.is_empty() || embedding2.is_empty() {
        return Err(MatchError::EmptyEmbedding);
    }
    if embedding1.len() != embedding2.len() {
        return Err(MatchError::DimensionMismatch {
            left: embedding1.len(),
            right: embedding2.len(),
        });
    }
    for (embedding, values) in [(1u8, embedding1), (2u8, embedding2)] {
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(MatchError::NonFinite { embedding, index });
        }
    }
    Ok(())
}
