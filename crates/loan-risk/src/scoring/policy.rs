use std::fmt;

use serde::{Deserialize, Serialize};

use super::config::ClassificationThresholds;

/// Coarse bucket of the numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Action suggested to the loan officer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Recommendation {
    Approve,
    Review,
    Deny,
}

impl Recommendation {
    pub fn label(self) -> &'static str {
        match self {
            Recommendation::Approve => "APPROVE",
            Recommendation::Review => "REVIEW",
            Recommendation::Deny => "DENY",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub(crate) fn classify(
    score: u8,
    thresholds: &ClassificationThresholds,
) -> (RiskLevel, Recommendation) {
    if score >= thresholds.low_risk_min {
        (RiskLevel::Low, Recommendation::Approve)
    } else if score >= thresholds.medium_risk_min {
        (RiskLevel::Medium, Recommendation::Review)
    } else {
        (RiskLevel::High, Recommendation::Deny)
    }
}

/// Clamp an unbounded point total into the 0..=100 score range.
pub(crate) fn clamp_score(total: i32) -> u8 {
    total.clamp(0, 100) as u8
}
