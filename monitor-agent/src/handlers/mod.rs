//! HTTP handlers for monitor-agent. All read shared state only.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::models::{DriftMetrics, PredictionRecord, SystemMetrics};
use crate::startup::AppState;

pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "monitor-agent",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

pub async fn logs(State(state): State<AppState>) -> Json<Vec<PredictionRecord>> {
    Json(state.logs.read().await.snapshot())
}

pub async fn system_metrics(State(state): State<AppState>) -> Json<SystemMetrics> {
    Json(*state.system.read().await)
}

pub async fn drift_metrics(State(state): State<AppState>) -> Json<DriftMetrics> {
    Json(state.drift.read().await.metrics())
}
