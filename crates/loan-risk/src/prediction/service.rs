use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::domain::{
    BatchEntry, BatchItem, BatchOutcome, BatchRequest, PredictionRequest, PredictionResponse,
    PredictionRun, SimulationRequest, DEFAULT_MODEL_NAME,
};
use super::log::{PredictionLog, PredictionLogError};
use crate::portfolio::{ModelPerformance, RiskDistribution, PERFORMANCE_WINDOW};
use crate::scoring::{
    ConfidenceSource, Features, RawFeatures, RiskScorer, ScoreResult, ScoringConfig,
    UniformConfidence,
};
use crate::simulation::{simulate, SimulationOutcome};

/// Model version reported when neither the request nor the configuration names one.
pub const DEFAULT_MODEL_VERSION: &str = "latest";

/// Service composing the scorer, the confidence source, and the prediction log.
pub struct PredictionService<L> {
    scorer: Arc<RiskScorer>,
    confidence: Arc<dyn ConfidenceSource>,
    log: Arc<L>,
    default_model_version: String,
}

impl<L> PredictionService<L>
where
    L: PredictionLog + 'static,
{
    pub fn new(log: Arc<L>, config: ScoringConfig) -> Self {
        Self {
            scorer: Arc::new(RiskScorer::new(config)),
            confidence: Arc::new(UniformConfidence::default()),
            log,
            default_model_version: DEFAULT_MODEL_VERSION.to_string(),
        }
    }

    pub fn with_confidence(mut self, confidence: Arc<dyn ConfidenceSource>) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn with_default_model_version(mut self, version: impl Into<String>) -> Self {
        self.default_model_version = version.into();
        self
    }

    pub fn scorer(&self) -> &RiskScorer {
        &self.scorer
    }

    /// Validate, score, and log a single prediction request.
    pub fn predict(
        &self,
        request: PredictionRequest,
    ) -> Result<PredictionResponse, PredictionError> {
        let model_name = non_empty(request.model_name).ok_or(PredictionError::MissingModelName)?;
        let features = request.features.ok_or(PredictionError::MissingFeatures)?;
        let model_version =
            non_empty(request.model_version).unwrap_or_else(|| self.default_model_version.clone());

        let (run, result) = self.score_run(
            Features::from(features),
            model_name,
            model_version,
            non_empty(request.application_id),
        );
        self.log.record(run.clone()).map_err(|err| {
            warn!(run_id = %run.run_id, error = %err, "failed to record prediction");
            err
        })?;

        debug!(
            run_id = %run.run_id,
            score = run.score,
            risk_level = %run.risk_level,
            "prediction recorded"
        );
        Ok(run.response(result.factors))
    }

    /// Rescore an application with adjusted features. Nothing is logged.
    pub fn simulate(
        &self,
        request: SimulationRequest,
    ) -> Result<SimulationOutcome, PredictionError> {
        let features = request.features.ok_or(PredictionError::MissingFeatures)?;
        Ok(simulate(
            &self.scorer,
            features,
            request.overrides,
            request.baseline_score,
        ))
    }

    /// Score every entry independently; a failing entry never fails the batch.
    pub fn batch(&self, request: BatchRequest) -> BatchOutcome {
        let model_name =
            non_empty(request.model_name).unwrap_or_else(|| DEFAULT_MODEL_NAME.to_string());
        let model_version =
            non_empty(request.model_version).unwrap_or_else(|| self.default_model_version.clone());

        let mut results = Vec::with_capacity(request.applications.len());
        let mut scored = Vec::new();

        for entry in request.applications {
            let item = match self.batch_entry(entry, &model_name, &model_version) {
                Ok((item, result)) => {
                    scored.push((result.risk_level, result.score));
                    item
                }
                Err(item) => item,
            };
            results.push(item);
        }

        let succeeded = scored.len();
        let failed = results.len() - succeeded;
        info!(succeeded, failed, "batch scoring finished");

        BatchOutcome {
            results,
            succeeded,
            failed,
            distribution: RiskDistribution::from_scores(scored),
        }
    }

    pub fn performance(&self) -> Result<ModelPerformance, PredictionError> {
        let runs = self.log.recent(PERFORMANCE_WINDOW)?;
        Ok(ModelPerformance::from_runs(&runs))
    }

    pub fn distribution(&self) -> Result<RiskDistribution, PredictionError> {
        let runs = self.log.recent(PERFORMANCE_WINDOW)?;
        Ok(RiskDistribution::from_runs(&runs))
    }

    fn batch_entry(
        &self,
        entry: BatchEntry,
        model_name: &str,
        model_version: &str,
    ) -> Result<(BatchItem, ScoreResult), BatchItem> {
        let BatchEntry {
            application_id,
            features,
        } = entry;
        let failure = |application_id: String, error: String| BatchItem {
            application_id,
            success: false,
            result: None,
            run_id: None,
            error: Some(error),
            timestamp: Utc::now(),
        };

        let raw = match features {
            Some(value @ Value::Object(_)) => match serde_json::from_value::<RawFeatures>(value) {
                Ok(raw) => raw,
                Err(err) => return Err(failure(application_id, format!("invalid features: {err}"))),
            },
            Some(Value::Null) | None => {
                return Err(failure(application_id, "missing features".to_string()))
            }
            Some(_) => {
                return Err(failure(
                    application_id,
                    "features must be an object".to_string(),
                ))
            }
        };

        let (run, result) = self.score_run(
            Features::from(raw),
            model_name.to_string(),
            model_version.to_string(),
            Some(application_id.clone()),
        );
        let run_id = run.run_id.clone();
        let timestamp = run.recorded_at;

        if let Err(err) = self.log.record(run) {
            warn!(%application_id, error = %err, "failed to record batch prediction");
            return Err(failure(application_id, err.to_string()));
        }

        Ok((
            BatchItem {
                application_id,
                success: true,
                result: Some(result.clone()),
                run_id: Some(run_id),
                error: None,
                timestamp,
            },
            result,
        ))
    }

    fn score_run(
        &self,
        features: Features,
        model_name: String,
        model_version: String,
        application_id: Option<String>,
    ) -> (PredictionRun, ScoreResult) {
        let result = self.scorer.score_with(&features, self.confidence.as_ref());
        let run = PredictionRun {
            run_id: format!("run_{}", Uuid::new_v4().simple()),
            model_name,
            model_version,
            application_id,
            features,
            score: result.score,
            risk_level: result.risk_level,
            recommendation: result.recommendation,
            confidence: result.confidence,
            recorded_at: Utc::now(),
        };
        (run, result)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Error raised by the prediction service.
#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    #[error("Missing required field: model_name")]
    MissingModelName,
    #[error("Missing required field: features")]
    MissingFeatures,
    #[error("malformed request body: {0}")]
    MalformedBody(String),
    #[error(transparent)]
    Log(#[from] PredictionLogError),
}
