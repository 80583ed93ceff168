use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use axum::Json;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::prediction::router::{predict_handler, simulate_handler};
use crate::prediction::{
    prediction_router, PredictionRequest, PredictionService, SimulationRequest,
};
use crate::scoring::ScoringConfig;

fn post_json(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .expect("request builds")
}

#[tokio::test]
async fn predict_handler_returns_full_payload() {
    let (service, _) = build_service();

    let response = predict_handler::<MemoryLog>(
        State(Arc::new(service)),
        Ok(Json(prediction_request(distressed_features()))),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["success"], json!(true));
    assert_eq!(payload["score"], json!(5));
    assert_eq!(payload["risk_level"], json!("High"));
    assert_eq!(payload["recommendation"], json!("DENY"));
    assert_eq!(payload["confidence"], json!(0.82));
    assert_eq!(payload["model_version"], json!("latest"));
    assert_eq!(payload["factors"][0], json!("High risk rating: D"));
    assert!(payload["timestamp"].as_str().is_some());
}

#[tokio::test]
async fn predict_handler_returns_bad_request_for_missing_fields() {
    let (service, _) = build_service();

    let response = predict_handler::<MemoryLog>(
        State(Arc::new(service)),
        Ok(Json(PredictionRequest::default())),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .unwrap_or_default()
        .contains("model_name"));
}

#[tokio::test]
async fn predict_handler_returns_internal_error_on_log_failure() {
    let service = PredictionService::new(Arc::new(UnavailableLog), ScoringConfig::default());

    let response = predict_handler::<UnavailableLog>(
        State(Arc::new(service)),
        Ok(Json(prediction_request(distressed_features()))),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], json!("Internal server error"));
    assert!(payload["message"]
        .as_str()
        .unwrap_or_default()
        .contains("database offline"));
}

#[tokio::test]
async fn simulate_handler_reports_score_change() {
    let (service, _) = build_service();

    let response = simulate_handler::<MemoryLog>(
        State(Arc::new(service)),
        Ok(Json(SimulationRequest {
            features: Some(raw_features(json!({ "SUGEF": "B2", "NoEmp": 5 }))),
            overrides: raw_features(json!({ "CreateJob": 12 })),
            baseline_score: Some(60),
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    // 70 + 5 (B2) + 5 (small loan) - 10 (no history) + 5 (jobs) = 75
    assert_eq!(payload["simulated"]["score"], json!(75));
    assert_eq!(payload["score_change"], json!(15));
}

#[tokio::test]
async fn predict_route_rejects_malformed_json() {
    let (service, log) = build_service();
    let router = prediction_router(Arc::new(service));

    let response = router
        .oneshot(post_json("/api/v1/risk/predict", b"{not json".to_vec()))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert!(payload.get("error").and_then(Value::as_str).is_some());
    assert!(log.runs().is_empty());
}

#[tokio::test]
async fn predict_route_accepts_legacy_payloads() {
    let (service, log) = build_service();
    let router = prediction_router(Arc::new(service));
    let body = json!({
        "model_name": "eva-loan-risk-model",
        "model_version": "latest",
        "features": {
            "sugef_rating": "A1",
            "amount_requested": "250000",
            "years_in_business": "10",
            "new_business": 0,
            "number_of_employees": "20",
            "jobs_to_create": "0",
            "industry": "Agriculture",
            "location": "San Jose",
        },
    });

    let response = router
        .oneshot(post_json(
            "/api/v1/risk/predict",
            serde_json::to_vec(&body).expect("serialize"),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["score"], json!(100));
    assert_eq!(payload["recommendation"], json!("APPROVE"));
    assert_eq!(
        payload["factors"],
        json!(["Standard risk assessment completed"])
    );
    assert_eq!(log.runs().len(), 1);
}

#[tokio::test]
async fn predict_route_accepts_duplicate_spellings() {
    let (service, log) = build_service();
    let router = prediction_router(Arc::new(service));
    let body = json!({
        "model_name": "eva-loan-risk-model",
        "features": {
            "sugef_rating": "D",
            "SUGEF": "D",
            "new_business": 1,
            "is_new_business": true,
            "amount_requested": 1500000,
            "years_in_business": 0.5,
            "number_of_employees": 3,
            "NoEmp": 3,
            "industry": "Construction",
        },
    });

    let response = router
        .oneshot(post_json(
            "/api/v1/risk/predict",
            serde_json::to_vec(&body).expect("serialize"),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["score"], json!(5));
    assert_eq!(payload["risk_level"], json!("High"));
    assert_eq!(log.runs().len(), 1);
}

#[tokio::test]
async fn batch_and_distribution_routes_share_the_log() {
    let (service, _) = build_service();
    let router = prediction_router(Arc::new(service));
    let body = json!({
        "applications": [
            { "application_id": "app-1", "features": distressed_features() },
            { "application_id": "app-2" },
        ],
    });

    let response = router
        .clone()
        .oneshot(post_json(
            "/api/v1/risk/batch",
            serde_json::to_vec(&body).expect("serialize"),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["succeeded"], json!(1));
    assert_eq!(payload["results"][1]["success"], json!(false));

    let response = router
        .oneshot(
            Request::get("/api/v1/risk/distribution")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["high_risk"], json!(1));
    assert_eq!(payload["total"], json!(1));
}

#[tokio::test]
async fn performance_route_reports_log_outage() {
    let service = PredictionService::new(Arc::new(UnavailableLog), ScoringConfig::default());
    let router = prediction_router(Arc::new(service));

    let response = router
        .oneshot(
            Request::get("/api/v1/risk/performance")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
