use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of the monitoring log: a polled prediction or a drift warning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub prediction: String,
    pub response_time: f64,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PredictionRecord {
    /// Log entry standing in for a drift warning.
    pub fn drift_warning(message: String) -> Self {
        Self {
            prediction: message,
            response_time: 0.0,
            timestamp: Utc::now(),
            confidence: None,
            model_version: None,
            error: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemMetrics {
    /// Global CPU usage in percent.
    pub cpu_usage: f64,
    /// Used memory in percent of total.
    pub memory_usage: f64,
    /// Agent uptime in seconds.
    pub uptime: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DriftMetrics {
    pub prediction_changes: usize,
    pub confidence_drop: f64,
    pub response_time_spike: f64,
}

impl DriftMetrics {
    pub fn warning_message(&self) -> String {
        format!(
            "Drift Detected: Changes={}, Confidence Drop={:.2}, Response Time Spike={:.2}s",
            self.prediction_changes, self.confidence_drop, self.response_time_spike
        )
    }
}
