use serde::{Deserialize, Serialize};
use std::fmt;

/// Face embedding vector as produced by the recognition model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding {
    pub values: Vec<f32>,
    /// Model version that produced this embedding (e.g., "facenet-512").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
}

impl Embedding {
    pub fn new(values: Vec<f32>) -> Self {
        Self {
            values,
            model_version: None,
        }
    }

    pub fn with_model_version(mut self, version: impl Into<String>) -> Self {
        self.model_version = Some(version.into());
        self
    }

    pub fn dimension(&self) -> usize {
        self.values.len()
    }

    /// L2-normalized copy of this embedding. See [`crate::normalize`].
    pub fn normalized(&self) -> NormalizedEmbedding {
        crate::normalize::normalize(self)
    }
}

impl From<Vec<f32>> for Embedding {
    fn from(values: Vec<f32>) -> Self {
        Self::new(values)
    }
}

impl AsRef<[f32]> for Embedding {
    fn as_ref(&self) -> &[f32] {
        &self.values
    }
}

/// An embedding with unit L2 norm, or the zero vector when the source norm
/// was too small to divide by.
///
/// Only [`crate::normalize`] constructs this type; the values are read-only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedEmbedding {
    values: Vec<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    model_version: Option<String>,
}

impl NormalizedEmbedding {
    pub(crate) fn from_parts(values: Vec<f32>, model_version: Option<String>) -> Self {
        Self {
            values,
            model_version,
        }
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn model_version(&self) -> Option<&str> {
        self.model_version.as_deref()
    }

    pub fn dimension(&self) -> usize {
        self.values.len()
    }

    /// True when the source vector was (near) zero and no direction survived.
    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|&v| v == 0.0)
    }

    pub fn into_embedding(self) -> Embedding {
        Embedding {
            values: self.values,
            model_version: self.model_version,
        }
    }
}

impl AsRef<[f32]> for NormalizedEmbedding {
    fn as_ref(&self) -> &[f32] {
        &self.values
    }
}

/// Graded confidence that two embeddings belong to the same face.
///
/// Variants are declared in ascending order so `>=` comparisons read as
/// "at least this confident".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl ConfidenceLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            ConfidenceLevel::Low => "LOW",
            ConfidenceLevel::Medium => "MEDIUM",
            ConfidenceLevel::High => "HIGH",
            ConfidenceLevel::VeryHigh => "VERY_HIGH",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic bucket for a comparison outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchType {
    SamePersonHighConfidence,
    SamePersonMediumConfidence,
    DifferentPeople,
}

impl MatchType {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchType::SamePersonHighConfidence => "SAME_PERSON_HIGH_CONFIDENCE",
            MatchType::SamePersonMediumConfidence => "SAME_PERSON_MEDIUM_CONFIDENCE",
            MatchType::DifferentPeople => "DIFFERENT_PEOPLE",
        }
    }

    pub fn is_same_person(self) -> bool {
        !matches!(self, MatchType::DifferentPeople)
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of comparing two embeddings.
///
/// `is_match` and `match_type` come from independent rules and may disagree:
/// a pair can be a match with `DifferentPeople`, or a non-match with
/// `SamePersonMediumConfidence`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// Cosine similarity [-1, 1].
    pub cosine_similarity: f32,
    pub euclidean_distance: f32,
    /// Currently identical to `cosine_similarity`.
    pub composite_similarity: f32,
    pub confidence: ConfidenceLevel,
    pub is_match: bool,
    pub match_type: MatchType,
    /// Population variance of the first embedding (see [`crate::QualitySource`]).
    pub quality_score: f32,
}
