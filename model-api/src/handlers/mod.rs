//! HTTP handlers for model-api.

pub mod predict;

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use service_core::error::AppError;

pub use predict::predict;

pub const RUNNING_MESSAGE: &str = "Model API is running!";

/// Liveness banner served at `/`.
pub async fn index() -> &'static str {
    RUNNING_MESSAGE
}

pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "model-api",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

pub async fn readiness_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ready" })))
}

pub async fn metrics() -> impl IntoResponse {
    crate::services::metrics::get_metrics()
}

pub async fn not_found() -> AppError {
    AppError::NotFound(anyhow::anyhow!("route not found"))
}
