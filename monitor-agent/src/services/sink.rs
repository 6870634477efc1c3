//! Destinations for monitoring events.

use async_trait::async_trait;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventLevel {
    Info,
    Warning,
    Error,
}

impl fmt::Display for EventLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventLevel::Info => f.write_str("INFO"),
            EventLevel::Warning => f.write_str("WARNING"),
            EventLevel::Error => f.write_str("ERROR"),
        }
    }
}

/// Receives every event the agent emits. Implementations must not fail the
/// caller; delivery problems are theirs to report.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn publish(&self, level: EventLevel, message: &str);
}

/// Emits events through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

#[async_trait]
impl EventSink for TracingSink {
    async fn publish(&self, level: EventLevel, message: &str) {
        match level {
            EventLevel::Info => tracing::info!(target: "monitor_events", "{}", message),
            EventLevel::Warning => tracing::warn!(target: "monitor_events", "{}", message),
            EventLevel::Error => tracing::error!(target: "monitor_events", "{}", message),
        }
    }
}
