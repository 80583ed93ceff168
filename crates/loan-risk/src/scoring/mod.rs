//! Rule-based risk scoring for business loan applications.
//!
//! [`RiskScorer`] is the single source of truth for the additive point system. It holds no
//! mutable state, so one instance can be shared across request handlers.

mod config;
mod confidence;
mod factors;
mod features;
mod policy;
mod rules;

#[cfg(test)]
mod tests;

pub use config::{
    ClassificationThresholds, RatingTable, RatingTablePreset, ScoringConfig, ScoringConfigError,
};
pub use confidence::{
    ConfidencePolicy, ConfidenceSource, FixedConfidence, NoConfidence, UniformConfidence,
};
pub use factors::STANDARD_ASSESSMENT_FACTOR;
pub use features::{Features, RatingCategory, RawFeatures, UnknownRating};
pub use policy::{Recommendation, RiskLevel};

use serde::{Deserialize, Serialize};

/// Stateless scorer applying one rubric configuration to feature records.
#[derive(Debug, Clone, Default)]
pub struct RiskScorer {
    config: ScoringConfig,
}

impl RiskScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score without a confidence value. Identical inputs always give identical results.
    pub fn score(&self, features: &Features) -> ScoreResult {
        let (adjustments, total) = rules::score_features(features, &self.config);
        let score = policy::clamp_score(total);
        let (risk_level, recommendation) = policy::classify(score, &self.config.thresholds);

        ScoreResult {
            score,
            risk_level,
            recommendation,
            confidence: None,
            factors: factors::explain(features, &self.config),
            base_score: self.config.base_score,
            adjustments,
        }
    }

    /// Score and attach whatever confidence `source` provides.
    pub fn score_with(
        &self,
        features: &Features,
        source: &dyn ConfidenceSource,
    ) -> ScoreResult {
        let mut result = self.score(features);
        result.confidence = source.sample();
        result
    }
}

/// Named rule that moved the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreRule {
    Rating,
    AmountRequested,
    BusinessAge,
    NewBusiness,
    AmountPerEmployee,
    JobCreation,
    Industry,
}

/// Discrete contribution to a score, kept for audits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreAdjustment {
    pub rule: ScoreRule,
    pub points: i16,
    pub notes: String,
}

/// Scoring output. `factors` is never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: u8,
    pub risk_level: RiskLevel,
    pub recommendation: Recommendation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    pub factors: Vec<String>,
    pub base_score: i16,
    pub adjustments: Vec<ScoreAdjustment>,
}

impl ScoreResult {
    /// Point total before clamping.
    pub fn raw_total(&self) -> i32 {
        self.adjustments
            .iter()
            .fold(i32::from(self.base_score), |total, adjustment| {
                total + i32::from(adjustment.points)
            })
    }

    pub fn summary(&self) -> String {
        format!(
            "score {} ({} risk): {}",
            self.score, self.risk_level, self.recommendation
        )
    }
}
