//! Two-face verification on top of an external embedding producer.
//!
//! The producer (a recognition model behind whatever runtime the host uses)
//! turns a cropped face into a raw vector. [`FaceVerifier`] checks its
//! dimension, L2-normalizes it and hands the pair to a [`FaceMatcher`].

use crate::error::MatchError;
use crate::matcher::FaceMatcher;
use crate::normalize::normalize;
use crate::types::{Embedding, MatchResult, NormalizedEmbedding};
use thiserror::Error;

/// Source of raw face embeddings.
pub trait EmbeddingProducer {
    /// Whatever the producer consumes: a cropped face image, a tensor, a path.
    type Input: ?Sized;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Output dimension of the underlying model, fixed for its lifetime.
    fn dimension(&self) -> usize;

    /// Run the model on one face.
    fn embed(&mut self, input: &Self::Input) -> Result<Embedding, Self::Error>;
}

#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("embedding producer failed: {0}")]
    Producer(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("expected {expected}-dim embedding, got {actual}")]
    Dimension { expected: usize, actual: usize },
    #[error(transparent)]
    Match(#[from] MatchError),
}

/// Embeds two faces with the same producer and compares them.
pub struct FaceVerifier<P> {
    producer: P,
    matcher: FaceMatcher,
}

impl<P: EmbeddingProducer> FaceVerifier<P> {
    pub fn new(producer: P, matcher: FaceMatcher) -> Self {
        Self { producer, matcher }
    }

    pub fn producer(&self) -> &P {
        &self.producer
    }

    pub fn into_producer(self) -> P {
        self.producer
    }

    /// Produce and normalize one embedding.
    pub fn embed(&mut self, input: &P::Input) -> Result<NormalizedEmbedding, VerifyError> {
        let raw = self
            .producer
            .embed(input)
            .map_err(|e| VerifyError::Producer(Box::new(e)))?;

        let expected = self.producer.dimension();
        if raw.dimension() != expected {
            return Err(VerifyError::Dimension {
                expected,
                actual: raw.dimension(),
            });
        }

        Ok(normalize(&raw))
    }

    /// Embed both faces, then compare. `face1` supplies the quality score
    /// under the default policy.
    pub fn verify(&mut self, face1: &P::Input, face2: &P::Input) -> Result<MatchResult, VerifyError> {
        let embedding1 = self.embed(face1)?;
        let embedding2 = self.embed(face2)?;

        let result = self.matcher.compare_embeddings(
            &embedding1.into_embedding(),
            &embedding2.into_embedding(),
        )?;

        tracing::info!(
            is_match = result.is_match,
            match_type = %result.match_type,
            confidence = %result.confidence,
            similarity = result.cosine_similarity,
            "verification complete"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ConfidenceLevel, MatchType};
    use std::collections::HashMap;

    #[derive(Error, Debug)]
    #[error("no embedding for face '{0}'")]
    struct UnknownFace(String);

    /// Looks faces up by name instead of running a model.
    struct TableProducer {
        dim: usize,
        table: HashMap<&'static str, Vec<f32>>,
        calls: usize,
    }

    impl EmbeddingProducer for TableProducer {
        type Input = str;
        type Error = UnknownFace;

        fn dimension(&self) -> usize {
            self.dim
        }

        fn embed(&mut self, input: &str) -> Result<Embedding, UnknownFace> {
            self.calls += 1;
            self.table
                .get(input)
                .map(|v| Embedding::new(v.clone()).with_model_version("table-v1"))
                .ok_or_else(|| UnknownFace(input.to_string()))
        }
    }

    fn verifier() -> FaceVerifier<TableProducer> {
        let table = HashMap::from([
            ("alice", vec![2.0, -2.0, 1.0, -1.0]),
            ("alice_again", vec![2.1, -1.9, 1.0, -1.05]),
            ("bob", vec![-1.0, 1.5, 2.0, 0.5]),
            ("blank", vec![0.0; 4]),
            ("short", vec![1.0, 2.0]),
        ]);
        FaceVerifier::new(
            TableProducer {
                dim: 4,
                table,
                calls: 0,
            },
            FaceMatcher::default(),
        )
    }

    #[test]
    fn test_embed_normalizes() {
        let mut v = verifier();
        let e = v.embed("alice").unwrap();
        let norm: f32 = e.values().iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
        assert_eq!(e.model_version(), Some("table-v1"));
    }

    #[test]
    fn test_verify_same_person() {
        let mut v = verifier();
        let r = v.verify("alice", "alice_again").unwrap();
        assert!(r.is_match);
        assert_eq!(r.confidence, ConfidenceLevel::VeryHigh);
        assert_eq!(r.match_type, MatchType::SamePersonHighConfidence);
        assert_eq!(v.producer().calls, 2);
    }

    #[test]
    fn test_verify_different_people() {
        let mut v = verifier();
        let r = v.verify("alice", "bob").unwrap();
        assert!(!r.is_match);
        assert_eq!(r.match_type, MatchType::DifferentPeople);
    }

    #[test]
    fn test_blank_face_is_not_an_error() {
        let mut v = verifier();
        let r = v.verify("blank", "alice").unwrap();
        assert_eq!(r.cosine_similarity, 0.0);
        assert!(!r.is_match);
    }

    #[test]
    fn test_producer_failure_surfaces() {
        let mut v = verifier();
        let err = v.verify("alice", "carol").unwrap_err();
        assert!(matches!(err, VerifyError::Producer(_)));
        assert!(err.to_string().contains("carol"));
    }

    #[test]
    fn test_wrong_dimension_rejected() {
        let mut v = verifier();
        let err = v.verify("alice", "short").unwrap_err();
        assert!(matches!(
            err,
            VerifyError::Dimension {
                expected: 4,
                actual: 2
            }
        ));
    }
}
