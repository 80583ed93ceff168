//! Prediction boundary: request validation, run logging, batch scoring, and HTTP routes.

pub mod domain;
pub mod log;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    BatchEntry, BatchItem, BatchOutcome, BatchRequest, PredictionRequest, PredictionResponse,
    PredictionRun, SimulationRequest, DEFAULT_MODEL_NAME, RULES_SOURCE,
};
pub use log::{PredictionLog, PredictionLogError};
pub use router::prediction_router;
pub use service::{PredictionError, PredictionService, DEFAULT_MODEL_VERSION};
