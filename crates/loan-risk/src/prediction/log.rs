use super::domain::PredictionRun;

/// Storage abstraction for prediction runs so the service can be exercised in isolation.
pub trait PredictionLog: Send + Sync {
    fn record(&self, run: PredictionRun) -> Result<(), PredictionLogError>;
    /// Newest runs first, at most `limit` of them.
    fn recent(&self, limit: usize) -> Result<Vec<PredictionRun>, PredictionLogError>;
}

/// Error enumeration for prediction log failures.
#[derive(Debug, thiserror::Error)]
pub enum PredictionLogError {
    #[error("prediction log unavailable: {0}")]
    Unavailable(String),
}
