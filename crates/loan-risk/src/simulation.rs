//! What-if scoring: rescore an application after adjusting some of its features.

use serde::{Deserialize, Serialize};

use crate::scoring::{Features, RawFeatures, RiskScorer, ScoreResult};

/// Baseline and adjusted results produced by the same scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    pub baseline: ScoreResult,
    pub simulated: ScoreResult,
    /// Score the change is measured against: the stored score when one was supplied.
    pub reference_score: u8,
    pub score_change: i16,
    pub simulated_features: Features,
}

impl SimulationOutcome {
    pub fn recommendation_changed(&self) -> bool {
        self.baseline.recommendation != self.simulated.recommendation
    }
}

pub fn simulate(
    scorer: &RiskScorer,
    baseline: RawFeatures,
    overrides: RawFeatures,
    stored_score: Option<u8>,
) -> SimulationOutcome {
    let baseline_features = Features::from(baseline.clone());
    let simulated_features = Features::from(baseline.merge(overrides));

    let baseline = scorer.score(&baseline_features);
    let simulated = scorer.score(&simulated_features);
    let reference_score = stored_score.map_or(baseline.score, |score| score.min(100));

    SimulationOutcome {
        score_change: i16::from(simulated.score) - i16::from(reference_score),
        reference_score,
        baseline,
        simulated,
        simulated_features,
    }
}
