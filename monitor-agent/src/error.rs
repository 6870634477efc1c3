use thiserror::Error;

/// Failure of a single poll against the model endpoint.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
