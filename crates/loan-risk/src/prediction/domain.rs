use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::portfolio::RiskDistribution;
use crate::scoring::{Features, RawFeatures, Recommendation, RiskLevel, ScoreResult};

/// Model name recorded when a caller does not supply one.
pub const DEFAULT_MODEL_NAME: &str = "loan-risk-rules";
/// Reported in every response; predictions always come from the rule set.
pub const RULES_SOURCE: &str = "rules";

/// Body of a prediction call. Required fields are optional here so that missing values
/// surface as validation errors instead of generic parse failures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    #[serde(default)]
    pub model_name: Option<String>,
    #[serde(default)]
    pub model_version: Option<String>,
    #[serde(default)]
    pub features: Option<RawFeatures>,
    #[serde(default)]
    pub application_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub success: bool,
    pub score: u8,
    pub risk_level: RiskLevel,
    pub recommendation: Recommendation,
    pub confidence: Option<f64>,
    pub run_id: String,
    pub factors: Vec<String>,
    pub model_version: String,
    pub timestamp: DateTime<Utc>,
    pub source: String,
}

/// Logged record of one prediction with its coerced inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRun {
    pub run_id: String,
    pub model_name: String,
    pub model_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    pub features: Features,
    pub score: u8,
    pub risk_level: RiskLevel,
    pub recommendation: Recommendation,
    pub confidence: Option<f64>,
    pub recorded_at: DateTime<Utc>,
}

impl PredictionRun {
    pub fn response(&self, factors: Vec<String>) -> PredictionResponse {
        PredictionResponse {
            success: true,
            score: self.score,
            risk_level: self.risk_level,
            recommendation: self.recommendation,
            confidence: self.confidence,
            run_id: self.run_id.clone(),
            factors,
            model_version: self.model_version.clone(),
            timestamp: self.recorded_at,
            source: RULES_SOURCE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    #[serde(default)]
    pub features: Option<RawFeatures>,
    #[serde(default)]
    pub overrides: RawFeatures,
    #[serde(default)]
    pub baseline_score: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchRequest {
    #[serde(default)]
    pub model_name: Option<String>,
    #[serde(default)]
    pub model_version: Option<String>,
    pub applications: Vec<BatchEntry>,
}

/// One application in a batch. `features` stays raw so one bad entry cannot reject the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchEntry {
    pub application_id: String,
    #[serde(default)]
    pub features: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchItem {
    pub application_id: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ScoreResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub results: Vec<BatchItem>,
    pub succeeded: usize,
    pub failed: usize,
    pub distribution: RiskDistribution,
}
