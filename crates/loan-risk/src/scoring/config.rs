use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::features::RatingCategory;

/// Point deltas applied per rating category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingTable {
    pub a1: i16,
    pub a2: i16,
    pub b1: i16,
    pub b2: i16,
    pub c1: i16,
    pub c2: i16,
    pub d: i16,
}

impl RatingTable {
    /// Deltas served by the prediction endpoint. This is the canonical table.
    pub const fn prediction() -> Self {
        Self {
            a1: 20,
            a2: 15,
            b1: 10,
            b2: 5,
            c1: -10,
            c2: -15,
            d: -25,
        }
    }

    /// Deltas used by the what-if playground and intake form.
    pub const fn simulation() -> Self {
        Self {
            a1: 15,
            a2: 10,
            b1: 5,
            b2: 0,
            c1: -10,
            c2: -15,
            d: -25,
        }
    }

    pub fn delta(&self, rating: RatingCategory) -> i16 {
        match rating {
            RatingCategory::A1 => self.a1,
            RatingCategory::A2 => self.a2,
            RatingCategory::B1 => self.b1,
            RatingCategory::B2 => self.b2,
            RatingCategory::C1 => self.c1,
            RatingCategory::C2 => self.c2,
            RatingCategory::D => self.d,
        }
    }

    /// True when better grades never earn fewer points than worse ones.
    pub fn is_monotonic(&self) -> bool {
        RatingCategory::ALL
            .windows(2)
            .all(|pair| self.delta(pair[0]) >= self.delta(pair[1]))
    }
}

impl Default for RatingTable {
    fn default() -> Self {
        Self::prediction()
    }
}

/// Named rating tables selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingTablePreset {
    #[default]
    Prediction,
    Simulation,
}

impl RatingTablePreset {
    pub fn table(self) -> RatingTable {
        match self {
            RatingTablePreset::Prediction => RatingTable::prediction(),
            RatingTablePreset::Simulation => RatingTable::simulation(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RatingTablePreset::Prediction => "prediction",
            RatingTablePreset::Simulation => "simulation",
        }
    }
}

impl FromStr for RatingTablePreset {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "prediction" | "stub" | "default" => Ok(Self::Prediction),
            "simulation" | "playground" => Ok(Self::Simulation),
            other => Err(format!(
                "unknown rating table '{other}' (expected prediction or simulation)"
            )),
        }
    }
}

/// Minimum scores for the Low and Medium risk buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationThresholds {
    pub low_risk_min: u8,
    pub medium_risk_min: u8,
}

impl Default for ClassificationThresholds {
    fn default() -> Self {
        Self {
            low_risk_min: 80,
            medium_risk_min: 60,
        }
    }
}

/// Tunable parts of the scoring rubric. Amount, tenure, and job thresholds are fixed rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub base_score: i16,
    pub rating_table: RatingTable,
    pub high_risk_industries: Vec<String>,
    pub thresholds: ClassificationThresholds,
}

impl ScoringConfig {
    pub fn with_preset(preset: RatingTablePreset) -> Self {
        Self {
            rating_table: preset.table(),
            ..Self::default()
        }
    }

    pub fn is_high_risk_industry(&self, industry: &str) -> bool {
        let industry = industry.trim();
        self.high_risk_industries
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(industry))
    }

    pub fn validate(&self) -> Result<(), ScoringConfigError> {
        let ClassificationThresholds {
            low_risk_min,
            medium_risk_min,
        } = self.thresholds;

        if low_risk_min > 100 || medium_risk_min >= low_risk_min {
            return Err(ScoringConfigError::ThresholdOrder {
                low_risk_min,
                medium_risk_min,
            });
        }

        if !self.rating_table.is_monotonic() {
            return Err(ScoringConfigError::NonMonotonicRatingTable);
        }

        Ok(())
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_score: 70,
            rating_table: RatingTable::prediction(),
            high_risk_industries: vec![
                "Construction".to_string(),
                "Real Estate".to_string(),
                "Hospitality".to_string(),
            ],
            thresholds: ClassificationThresholds::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoringConfigError {
    ThresholdOrder {
        low_risk_min: u8,
        medium_risk_min: u8,
    },
    NonMonotonicRatingTable,
}

impl fmt::Display for ScoringConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringConfigError::ThresholdOrder {
                low_risk_min,
                medium_risk_min,
            } => write!(
                f,
                "risk thresholds must satisfy medium ({medium_risk_min}) < low ({low_risk_min}) <= 100"
            ),
            ScoringConfigError::NonMonotonicRatingTable => {
                write!(f, "rating table must not reward worse grades over better ones")
            }
        }
    }
}

impl std::error::Error for ScoringConfigError {}
