use async_trait::async_trait;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use monitor_agent::config::{DriftConfig, MonitorConfig};
use monitor_agent::services::{EventLevel, EventSink};
use serde_json::json;
use service_core::config::Config;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Sink that keeps every event for later assertions.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<(EventLevel, String)>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<(EventLevel, String)> {
        self.events.lock().unwrap().clone()
    }

    pub fn messages(&self, level: EventLevel) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }
}

#[async_trait]
impl EventSink for RecordingSink {
    async fn publish(&self, level: EventLevel, message: &str) {
        self.events.lock().unwrap().push((level, message.to_string()));
    }
}

pub fn test_config(model_endpoint: &str) -> MonitorConfig {
    MonitorConfig {
        common: Config {
            host: "127.0.0.1".to_string(),
            port: 0, // Random port
        },
        model_endpoint: model_endpoint.to_string(),
        polling_interval: Duration::from_millis(50),
        system_interval: Duration::from_millis(50),
        request_timeout: Duration::from_secs(5),
        drift: DriftConfig::default(),
        max_log_entries: 100,
        cloudwatch: None,
    }
}

#[derive(Clone)]
struct StubModel {
    labels: Arc<Vec<&'static str>>,
    confidence: Option<f64>,
    calls: Arc<AtomicUsize>,
}

async fn stub_predict(State(stub): State<StubModel>) -> impl IntoResponse {
    let call = stub.calls.fetch_add(1, Ordering::SeqCst);
    let label = stub.labels[call % stub.labels.len()];

    let mut body = json!({ "prediction": label, "response_time": 0.1234 });
    if let Some(confidence) = stub.confidence {
        body["confidence"] = json!(confidence);
    }
    Json(body)
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}/predict", addr)
}

/// Model stand-in cycling through `labels`.
pub async fn spawn_stub_model(labels: Vec<&'static str>, confidence: Option<f64>) -> String {
    let stub = StubModel {
        labels: Arc::new(labels),
        confidence,
        calls: Arc::new(AtomicUsize::new(0)),
    };
    serve(Router::new().route("/predict", post(stub_predict)).with_state(stub)).await
}

pub async fn spawn_failing_model() -> String {
    serve(Router::new().route(
        "/predict",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    ))
    .await
}

pub async fn spawn_garbled_model() -> String {
    serve(Router::new().route("/predict", post(|| async { "definitely not json" }))).await
}

/// An endpoint nothing listens on.
pub async fn unreachable_endpoint() -> String {
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/predict", addr)
}
