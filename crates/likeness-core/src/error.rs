use thiserror::Error;

/// Rejected comparison input.
///
/// The facade has no failure mode other than bad input, so this whole enum
/// is the invalid-input category; each variant names what was wrong.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatchError {
    #[error("invalid input: embedding is empty")]
    EmptyEmbedding,
    #[error("invalid input: embedding dimensions differ ({left} vs {right})")]
    DimensionMismatch { left: usize, right: usize },
    #[error("invalid input: embedding {embedding} has a non-finite value at index {index}")]
    NonFinite { embedding: u8, index: usize },
    #[error("invalid input: embeddings come from different models ({left} vs {right})")]
    ModelMismatch { left: String, right: String },
}
