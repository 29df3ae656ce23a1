//! Tunable cutpoints for scoring and deciding.
//!
//! The defaults are the empirically tuned values the decision rules were
//! calibrated with. Every comparison against a cutpoint is strict.

use crate::types::ConfidenceLevel;
use serde::{Deserialize, Serialize};

// --- Confidence rubric: cosine band ---
pub const COSINE_BAND_TOP: f32 = 0.90;
pub const COSINE_BAND_MID: f32 = 0.80;
pub const COSINE_BAND_LOW: f32 = 0.70;
pub const COSINE_POINTS_TOP: u32 = 4;
pub const COSINE_POINTS_MID: u32 = 3;
pub const COSINE_POINTS_LOW: u32 = 2;

// --- Confidence rubric: distance band ---
pub const DISTANCE_BAND_TOP: f32 = 0.5;
pub const DISTANCE_BAND_MID: f32 = 1.0;
pub const DISTANCE_BAND_LOW: f32 = 1.5;
pub const DISTANCE_POINTS_TOP: u32 = 4;
pub const DISTANCE_POINTS_MID: u32 = 3;
pub const DISTANCE_POINTS_LOW: u32 = 2;

// --- Confidence rubric: variance band ---
pub const VARIANCE_BAND_HIGH: f32 = 0.01;
pub const VARIANCE_BAND_LOW: f32 = 0.005;
pub const VARIANCE_POINTS_HIGH: u32 = 2;
pub const VARIANCE_POINTS_LOW: u32 = 1;

// --- Confidence rubric: score → level ---
pub const SCORE_VERY_HIGH: u32 = 8;
pub const SCORE_HIGH: u32 = 6;
pub const SCORE_MEDIUM: u32 = 4;

// --- Match decision ---
pub const DECISION_BASE_SIMILARITY: f32 = 0.75;
pub const DECISION_QUALITY_VARIANCE: f32 = 0.01;
pub const DECISION_LOW_QUALITY_MULTIPLIER: f32 = 0.9;
pub const DECISION_MAX_DISTANCE: f32 = 1.2;

// --- Match type categories ---
pub const HIGH_CATEGORY_MIN_SIMILARITY: f32 = 0.85;
pub const HIGH_CATEGORY_MAX_DISTANCE: f32 = 0.8;
pub const MEDIUM_CATEGORY_MIN_SIMILARITY: f32 = 0.75;
pub const MEDIUM_CATEGORY_MAX_DISTANCE: f32 = 1.2;

/// Three descending cutpoints with the points each one awards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub top: f32,
    pub mid: f32,
    pub low: f32,
    pub top_points: u32,
    pub mid_points: u32,
    pub low_points: u32,
}

/// Additive rubric behind [`crate::confidence::classify`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidencePolicy {
    pub variance_high: f32,
    pub variance_low: f32,
    pub variance_high_points: u32,
    pub variance_low_points: u32,
    pub very_high_score: u32,
    pub high_score: u32,
    pub medium_score: u32,
    /// Cosine similarity must be strictly above a cutpoint to score.
    pub cosine: Band,
    /// Euclidean distance must be strictly below a cutpoint to score.
    pub distance: Band,
}

impl Default for ConfidencePolicy {
    fn default() -> Self {
        Self {
            variance_high: VARIANCE_BAND_HIGH,
            variance_low: VARIANCE_BAND_LOW,
            variance_high_points: VARIANCE_POINTS_HIGH,
            variance_low_points: VARIANCE_POINTS_LOW,
            very_high_score: SCORE_VERY_HIGH,
            high_score: SCORE_HIGH,
            medium_score: SCORE_MEDIUM,
            cosine: Band {
                top: COSINE_BAND_TOP,
                mid: COSINE_BAND_MID,
                low: COSINE_BAND_LOW,
                top_points: COSINE_POINTS_TOP,
                mid_points: COSINE_POINTS_MID,
                low_points: COSINE_POINTS_LOW,
            },
            distance: Band {
                top: DISTANCE_BAND_TOP,
                mid: DISTANCE_BAND_MID,
                low: DISTANCE_BAND_LOW,
                top_points: DISTANCE_POINTS_TOP,
                mid_points: DISTANCE_POINTS_MID,
                low_points: DISTANCE_POINTS_LOW,
            },
        }
    }
}

/// Rule behind [`crate::decision::decide`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionPolicy {
    pub base_similarity: f32,
    /// Variance above which the embedding counts as good quality.
    pub quality_variance: f32,
    /// Applied to `base_similarity` for embeddings at or below `quality_variance`.
    pub low_quality_multiplier: f32,
    pub max_distance: f32,
    /// Off by default: the confidence level does not take part in the decision.
    pub use_confidence_in_decision: bool,
    /// Only consulted when `use_confidence_in_decision` is set.
    pub min_confidence: ConfidenceLevel,
}

impl Default for DecisionPolicy {
    fn default() -> Self {
        Self {
            base_similarity: DECISION_BASE_SIMILARITY,
            quality_variance: DECISION_QUALITY_VARIANCE,
            low_quality_multiplier: DECISION_LOW_QUALITY_MULTIPLIER,
            max_distance: DECISION_MAX_DISTANCE,
            use_confidence_in_decision: false,
            min_confidence: ConfidenceLevel::Medium,
        }
    }
}

/// One same-person bucket: minimum level plus similarity/distance gates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub min_confidence: ConfidenceLevel,
    pub min_similarity: f32,
    pub max_distance: f32,
}

/// Rules behind [`crate::decision::categorize`], checked high first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryPolicy {
    pub high: CategoryRule,
    pub medium: CategoryRule,
}

impl Default for CategoryPolicy {
    fn default() -> Self {
        Self {
            high: CategoryRule {
                min_confidence: ConfidenceLevel::VeryHigh,
                min_similarity: HIGH_CATEGORY_MIN_SIMILARITY,
                max_distance: HIGH_CATEGORY_MAX_DISTANCE,
            },
            medium: CategoryRule {
                min_confidence: ConfidenceLevel::High,
                min_similarity: MEDIUM_CATEGORY_MIN_SIMILARITY,
                max_distance: MEDIUM_CATEGORY_MAX_DISTANCE,
            },
        }
    }
}

/// Which embedding(s) the quality score is computed from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualitySource {
    /// Variance of the first embedding only.
    #[default]
    First,
    /// Average of both embeddings' variances.
    Mean,
}

impl std::str::FromStr for QualitySource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" => Ok(QualitySource::First),
            "mean" => Ok(QualitySource::Mean),
            other => Err(format!("unknown quality source '{other}' (expected first|mean)")),
        }
    }
}

/// Complete set of tunables for a [`crate::FaceMatcher`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchPolicy {
    pub quality_source: QualitySource,
    pub confidence: ConfidencePolicy,
    pub decision: DecisionPolicy,
    pub category: CategoryPolicy,
}

impl MatchPolicy {
    /// Names of any threshold fields holding NaN or infinity.
    pub fn non_finite_fields(&self) -> Vec<&'static str> {
        let c = &self.confidence;
        let d = &self.decision;
        let k = &self.category;
        [
            ("confidence.cosine.top", c.cosine.top),
            ("confidence.cosine.mid", c.cosine.mid),
            ("confidence.cosine.low", c.cosine.low),
            ("confidence.distance.top", c.distance.top),
            ("confidence.distance.mid", c.distance.mid),
            ("confidence.distance.low", c.distance.low),
            ("confidence.variance_high", c.variance_high),
            ("confidence.variance_low", c.variance_low),
            ("decision.base_similarity", d.base_similarity),
            ("decision.quality_variance", d.quality_variance),
            ("decision.low_quality_multiplier", d.low_quality_multiplier),
            ("decision.max_distance", d.max_distance),
            ("category.high.min_similarity", k.high.min_similarity),
            ("category.high.max_distance", k.high.max_distance),
            ("category.medium.min_similarity", k.medium.min_similarity),
            ("category.medium.max_distance", k.medium.max_distance),
        ]
        .into_iter()
        .filter(|(_, v)| !v.is_finite())
        .map(|(name, _)| name)
        .collect()
    }
}
