//! Aggregate views over scored applications and logged prediction runs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::prediction::PredictionRun;
use crate::scoring::RiskLevel;

/// Number of runs considered when computing model performance.
pub const PERFORMANCE_WINDOW: usize = 1000;
/// Newest runs considered for the high-confidence share.
pub const RECENT_WINDOW: usize = 100;
pub const HIGH_CONFIDENCE: f64 = 0.8;

/// Counts per risk bucket and the mean score.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RiskDistribution {
    pub low_risk: usize,
    pub medium_risk: usize,
    pub high_risk: usize,
    pub total: usize,
    pub average_score: f64,
}

impl RiskDistribution {
    pub fn from_scores<I>(scores: I) -> Self
    where
        I: IntoIterator<Item = (RiskLevel, u8)>,
    {
        let mut distribution = RiskDistribution::default();
        let mut score_sum = 0u64;

        for (level, score) in scores {
            match level {
                RiskLevel::Low => distribution.low_risk += 1,
                RiskLevel::Medium => distribution.medium_risk += 1,
                RiskLevel::High => distribution.high_risk += 1,
            }
            distribution.total += 1;
            score_sum += u64::from(score);
        }

        if distribution.total > 0 {
            distribution.average_score = score_sum as f64 / distribution.total as f64;
        }
        distribution
    }

    pub fn from_runs(runs: &[PredictionRun]) -> Self {
        Self::from_scores(runs.iter().map(|run| (run.risk_level, run.score)))
    }
}

/// Usage and confidence statistics for logged predictions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelPerformance {
    pub total_predictions: usize,
    pub average_confidence: f64,
    pub model_usage: BTreeMap<String, usize>,
    /// Percentage of the newest runs whose confidence exceeded [`HIGH_CONFIDENCE`].
    pub recent_high_confidence_pct: f64,
}

impl ModelPerformance {
    /// `runs` must be ordered newest first.
    pub fn from_runs(runs: &[PredictionRun]) -> Self {
        let runs = &runs[..runs.len().min(PERFORMANCE_WINDOW)];
        if runs.is_empty() {
            return Self::default();
        }

        let confidence_sum: f64 = runs.iter().map(|run| run.confidence.unwrap_or(0.0)).sum();

        let mut model_usage = BTreeMap::new();
        for run in runs {
            *model_usage.entry(run.model_version.clone()).or_insert(0) += 1;
        }

        let recent = &runs[..runs.len().min(RECENT_WINDOW)];
        let confident = recent
            .iter()
            .filter(|run| run.confidence.unwrap_or(0.0) > HIGH_CONFIDENCE)
            .count();

        Self {
            total_predictions: runs.len(),
            average_confidence: confidence_sum / runs.len() as f64,
            model_usage,
            recent_high_confidence_pct: confident as f64 / recent.len() as f64 * 100.0,
        }
    }
}
