use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};

use crate::prediction::{
    PredictionLog, PredictionLogError, PredictionRequest, PredictionRun, PredictionService,
};
use crate::scoring::{
    FixedConfidence, Features, RatingCategory, RawFeatures, Recommendation, RiskLevel,
    ScoringConfig,
};

#[derive(Default, Clone)]
pub(super) struct MemoryLog {
    runs: Arc<Mutex<Vec<PredictionRun>>>,
}

impl MemoryLog {
    pub(super) fn runs(&self) -> Vec<PredictionRun> {
        self.runs.lock().expect("log mutex poisoned").clone()
    }
}

impl PredictionLog for MemoryLog {
    fn record(&self, run: PredictionRun) -> Result<(), PredictionLogError> {
        self.runs.lock().expect("log mutex poisoned").push(run);
        Ok(())
    }

    fn recent(&self, limit: usize) -> Result<Vec<PredictionRun>, PredictionLogError> {
        let guard = self.runs.lock().expect("log mutex poisoned");
        Ok(guard.iter().rev().take(limit).cloned().collect())
    }
}

pub(super) struct UnavailableLog;

impl PredictionLog for UnavailableLog {
    fn record(&self, _run: PredictionRun) -> Result<(), PredictionLogError> {
        Err(PredictionLogError::Unavailable("database offline".to_string()))
    }

    fn recent(&self, _limit: usize) -> Result<Vec<PredictionRun>, PredictionLogError> {
        Err(PredictionLogError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> (PredictionService<MemoryLog>, Arc<MemoryLog>) {
    let log = Arc::new(MemoryLog::default());
    let service = PredictionService::new(log.clone(), ScoringConfig::default())
        .with_confidence(Arc::new(FixedConfidence::new(0.82)));
    (service, log)
}

pub(super) fn raw_features(payload: Value) -> RawFeatures {
    serde_json::from_value(payload).expect("raw features")
}

pub(super) fn distressed_features() -> Value {
    json!({
        "sugef_rating": "D",
        "amount_requested": 1500000,
        "years_in_business": 0.5,
        "new_business": true,
        "number_of_employees": 3,
        "jobs_to_create": 0,
        "industry": "Construction",
    })
}

pub(super) fn prediction_request(features: Value) -> PredictionRequest {
    PredictionRequest {
        model_name: Some("eva-loan-risk-model".to_string()),
        model_version: None,
        features: Some(raw_features(features)),
        application_id: None,
    }
}

pub(super) fn logged_run(
    model_version: &str,
    score: u8,
    risk_level: RiskLevel,
    confidence: Option<f64>,
) -> PredictionRun {
    PredictionRun {
        run_id: format!("run-{model_version}-{score}"),
        model_name: "eva-loan-risk-model".to_string(),
        model_version: model_version.to_string(),
        application_id: None,
        features: Features {
            rating_category: Some(RatingCategory::B1),
            ..Features::default()
        },
        score,
        risk_level,
        recommendation: Recommendation::Review,
        confidence,
        recorded_at: Utc
            .with_ymd_and_hms(2025, 3, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp"),
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
