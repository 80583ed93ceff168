use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use super::domain::{BatchRequest, PredictionRequest, SimulationRequest};
use super::log::PredictionLog;
use super::service::{PredictionError, PredictionService};

/// Router builder exposing the scoring endpoints.
pub fn prediction_router<L>(service: Arc<PredictionService<L>>) -> Router
where
    L: PredictionLog + 'static,
{
    Router::new()
        .route("/api/v1/risk/predict", post(predict_handler::<L>))
        .route("/api/v1/risk/simulate", post(simulate_handler::<L>))
        .route("/api/v1/risk/batch", post(batch_handler::<L>))
        .route("/api/v1/risk/performance", get(performance_handler::<L>))
        .route("/api/v1/risk/distribution", get(distribution_handler::<L>))
        .with_state(service)
}

impl IntoResponse for PredictionError {
    fn into_response(self) -> Response {
        match self {
            PredictionError::MissingModelName
            | PredictionError::MissingFeatures
            | PredictionError::MalformedBody(_) => {
                let payload = json!({ "error": self.to_string() });
                (StatusCode::BAD_REQUEST, Json(payload)).into_response()
            }
            PredictionError::Log(err) => {
                let payload = json!({
                    "error": "Internal server error",
                    "message": err.to_string(),
                });
                (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
            }
        }
    }
}

fn malformed(rejection: JsonRejection) -> PredictionError {
    PredictionError::MalformedBody(rejection.body_text())
}

pub(crate) async fn predict_handler<L>(
    State(service): State<Arc<PredictionService<L>>>,
    payload: Result<Json<PredictionRequest>, JsonRejection>,
) -> Response
where
    L: PredictionLog + 'static,
{
    let result = payload
        .map_err(malformed)
        .and_then(|Json(request)| service.predict(request));

    match result {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn simulate_handler<L>(
    State(service): State<Arc<PredictionService<L>>>,
    payload: Result<Json<SimulationRequest>, JsonRejection>,
) -> Response
where
    L: PredictionLog + 'static,
{
    let result = payload
        .map_err(malformed)
        .and_then(|Json(request)| service.simulate(request));

    match result {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn batch_handler<L>(
    State(service): State<Arc<PredictionService<L>>>,
    payload: Result<Json<BatchRequest>, JsonRejection>,
) -> Response
where
    L: PredictionLog + 'static,
{
    match payload {
        Ok(Json(request)) => {
            let outcome = service.batch(request);
            (StatusCode::OK, Json(outcome)).into_response()
        }
        Err(rejection) => malformed(rejection).into_response(),
    }
}

pub(crate) async fn performance_handler<L>(
    State(service): State<Arc<PredictionService<L>>>,
) -> Response
where
    L: PredictionLog + 'static,
{
    match service.performance() {
        Ok(performance) => (StatusCode::OK, Json(performance)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn distribution_handler<L>(
    State(service): State<Arc<PredictionService<L>>>,
) -> Response
where
    L: PredictionLog + 'static,
{
    match service.distribution() {
        Ok(distribution) => (StatusCode::OK, Json(distribution)).into_response(),
        Err(err) => err.into_response(),
    }
}
