//! Prometheus metrics for model-api.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry};
use std::sync::{Once, OnceLock};

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
pub static PROMETHEUS_REGISTRY: OnceLock<Registry> = OnceLock::new();
pub static MODEL_PREDICTIONS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static MODEL_PREDICTION_LATENCY_SECONDS: OnceLock<HistogramVec> = OnceLock::new();

static REGISTRY_INIT: Once = Once::new();

/// Initialize metrics. Safe to call more than once; only the first call
/// installs the global recorder.
pub fn init_metrics() {
    METRICS_HANDLE.get_or_init(|| match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => handle,
        Err(e) => {
            tracing::warn!(error = %e, "Global metrics recorder already installed");
            PrometheusBuilder::new().build_recorder().handle()
        }
    });

    REGISTRY_INIT.call_once(init_registry);
}

fn init_registry() {
    let registry = Registry::new();

    let predictions = IntCounterVec::new(
        Opts::new(
            "model_predictions_total",
            "Total simulated predictions by label",
        ),
        &["prediction"],
    )
    .expect("Failed to create model_predictions_total metric");

    let latency = HistogramVec::new(
        HistogramOpts::new(
            "model_prediction_latency_seconds",
            "Simulated inference latency in seconds",
        )
        .buckets(vec![0.05, 0.1, 0.2, 0.3, 0.4, 0.5, 0.75, 1.0]),
        &["prediction"],
    )
    .expect("Failed to create model_prediction_latency_seconds metric");

    registry
        .register(Box::new(predictions.clone()))
        .expect("Failed to register model_predictions_total");
    registry
        .register(Box::new(latency.clone()))
        .expect("Failed to register model_prediction_latency_seconds");

    let _ = PROMETHEUS_REGISTRY.set(registry);
    let _ = MODEL_PREDICTIONS_TOTAL.set(predictions);
    let _ = MODEL_PREDICTION_LATENCY_SECONDS.set(latency);

    tracing::info!("Prometheus metrics initialized");
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let mut output = METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string());

    if let Some(registry) = PROMETHEUS_REGISTRY.get() {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let metric_families = registry.gather();
        let mut buffer = Vec::new();
        if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
            tracing::error!(error = %e, "Failed to encode metrics");
        }
        if let Ok(custom_metrics) = String::from_utf8(buffer) {
            output.push_str(&custom_metrics);
        }
    }

    output
}

/// Record a served prediction.
pub fn record_prediction(prediction: &str, response_time_secs: f64) {
    if let Some(counter) = MODEL_PREDICTIONS_TOTAL.get() {
        counter.with_label_values(&[prediction]).inc();
    }
    if let Some(histogram) = MODEL_PREDICTION_LATENCY_SECONDS.get() {
        histogram
            .with_label_values(&[prediction])
            .observe(response_time_secs);
    }
}
