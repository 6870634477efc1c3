use axum::{extract::State, Json};

use crate::models::PredictionResult;
use crate::services::metrics;
use crate::startup::AppState;

/// `POST /predict`. The request body is never read.
pub async fn predict(State(state): State<AppState>) -> Json<PredictionResult> {
    let result = state.model.predict().await;

    tracing::info!(
        prediction = %result.prediction,
        response_time = result.response_time,
        "Served prediction"
    );
    metrics::record_prediction(result.prediction.as_str(), result.response_time);

    Json(result)
}
