//! Periodic probing of the model endpoint.

use crate::error::MonitorError;
use crate::models::{DriftMetrics, PredictionRecord};
use crate::services::{DriftDetector, EventLevel, EventSink, LogStore};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Payload sent with every poll request. The model ignores it.
pub const REQUEST_TEXT: &str = "Hello model!";

/// HTTP client for the model's `/predict` endpoint.
#[derive(Debug, Clone)]
pub struct ModelClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ModelClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, MonitorError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one prediction request. The returned record carries the round-trip time seen
    /// by the agent, not the time reported by the model.
    pub async fn request_prediction(&self) -> Result<PredictionRecord, MonitorError> {
        let start = Instant::now();
        let response = self
            .http
            .post(&self.endpoint)
            .json(&json!({ "text": REQUEST_TEXT }))
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        let response_time = start.elapsed().as_secs_f64();

        if !status.is_success() {
            return Err(MonitorError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        let mut record: PredictionRecord = serde_json::from_slice(&body)?;
        record.timestamp = Utc::now();
        record.response_time = response_time;

        Ok(record)
    }
}

/// Ties the client to the shared log and drift state.
#[derive(Clone)]
pub struct Monitor {
    client: ModelClient,
    logs: Arc<RwLock<LogStore>>,
    drift: Arc<RwLock<DriftDetector>>,
    sink: Arc<dyn EventSink>,
}

impl Monitor {
    pub fn new(
        client: ModelClient,
        logs: Arc<RwLock<LogStore>>,
        drift: Arc<RwLock<DriftDetector>>,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            client,
            logs,
            drift,
            sink,
        }
    }

    /// Poll once, log the outcome and run drift detection.
    pub async fn poll_once(&self) -> Result<PredictionRecord, MonitorError> {
        let record = match self.client.request_prediction().await {
            Ok(record) => record,
            Err(e) => {
                self.sink.publish(EventLevel::Error, &e.to_string()).await;
                return Err(e);
            }
        };

        let message = format!(
            "Prediction: {} | Response Time: {:.4} sec | Confidence: {:.2}",
            record.prediction,
            record.response_time,
            record.confidence.unwrap_or_default()
        );
        self.sink.publish(EventLevel::Info, &message).await;

        self.logs.write().await.push(record.clone());

        let drift = self.drift.write().await.observe(
            &record.prediction,
            record.confidence,
            record.response_time,
        );
        if let Some(metrics) = drift {
            self.report_drift(metrics).await;
        }

        Ok(record)
    }

    async fn report_drift(&self, metrics: DriftMetrics) {
        let warning = metrics.warning_message();
        self.sink.publish(EventLevel::Warning, &warning).await;
        self.logs
            .write()
            .await
            .push(PredictionRecord::drift_warning(warning));
    }

    /// Poll forever, waiting `interval` after each round.
    pub async fn run(self, interval: Duration) {
        tracing::info!(
            endpoint = %self.client.endpoint(),
            interval_ms = interval.as_millis() as u64,
            "Polling model endpoint"
        );
        loop {
            if let Err(e) = self.poll_once().await {
                tracing::debug!(error = %e, "Poll round failed");
            }
            tokio::time::sleep(interval).await;
        }
    }
}
