use loan_risk::prediction::{PredictionLog, PredictionLogError, PredictionRun};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::VecDeque;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Runs retained by the in-memory log before the oldest are evicted.
const MAX_RETAINED_RUNS: usize = 10_000;

#[derive(Default, Clone)]
pub(crate) struct InMemoryPredictionLog {
    runs: Arc<Mutex<VecDeque<PredictionRun>>>,
}

impl PredictionLog for InMemoryPredictionLog {
    fn record(&self, run: PredictionRun) -> Result<(), PredictionLogError> {
        let mut guard = self
            .runs
            .lock()
            .map_err(|_| PredictionLogError::Unavailable("log mutex poisoned".to_string()))?;
        if guard.len() == MAX_RETAINED_RUNS {
            guard.pop_front();
        }
        guard.push_back(run);
        Ok(())
    }

    fn recent(&self, limit: usize) -> Result<Vec<PredictionRun>, PredictionLogError> {
        let guard = self
            .runs
            .lock()
            .map_err(|_| PredictionLogError::Unavailable("log mutex poisoned".to_string()))?;
        Ok(guard.iter().rev().take(limit).cloned().collect())
    }
}
