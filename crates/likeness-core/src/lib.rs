//! likeness-core — Face verification decision engine.
//!
//! Turns two face embeddings into a same-person judgment: cosine similarity,
//! Euclidean distance, a variance quality proxy, a graded confidence level,
//! a binary match decision and a match-type bucket. Embedding extraction is
//! left to an external [`EmbeddingProducer`].

pub mod confidence;
pub mod decision;
pub mod error;
pub mod math;
pub mod matcher;
pub mod normalize;
pub mod pipeline;
pub mod policy;
pub mod types;

pub use error::MatchError;
pub use matcher::{compare_embeddings, FaceMatcher};
pub use normalize::normalize;
pub use pipeline::{EmbeddingProducer, FaceVerifier, VerifyError};
pub use policy::{MatchPolicy, QualitySource};
pub use types::{ConfidenceLevel, Embedding, MatchResult, MatchType, NormalizedEmbedding};
