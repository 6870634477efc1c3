//! Ships monitor events to a CloudWatch Logs stream.

use crate::config::CloudWatchConfig;
use crate::services::sink::{EventLevel, EventSink, TracingSink};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_cloudwatchlogs::error::DisplayErrorContext;
use aws_sdk_cloudwatchlogs::types::InputLogEvent;
use aws_sdk_cloudwatchlogs::Client;
use chrono::Utc;

/// Line written to the log stream for one event.
pub fn format_event(level: EventLevel, message: &str) -> String {
    format!("[{}] {}", level, message)
}

/// Publishes every event locally and to CloudWatch Logs.
///
/// Delivery failures are logged and never reach the caller.
#[derive(Debug, Clone)]
pub struct CloudWatchSink {
    client: Client,
    config: CloudWatchConfig,
    local: TracingSink,
}

impl CloudWatchSink {
    /// Resolve credentials and region from the default AWS chain.
    pub async fn connect(config: CloudWatchConfig) -> Self {
        let aws_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        Self::with_client(Client::new(&aws_config), config).await
    }

    pub async fn with_client(client: Client, config: CloudWatchConfig) -> Self {
        let sink = Self {
            client,
            config,
            local: TracingSink,
        };
        sink.ensure_stream().await;
        sink
    }

    pub fn config(&self) -> &CloudWatchConfig {
        &self.config
    }

    async fn ensure_stream(&self) {
        let result = self
            .client
            .create_log_stream()
            .log_group_name(&self.config.log_group)
            .log_stream_name(&self.config.log_stream)
            .send()
            .await;

        match result {
            Ok(_) => tracing::info!(
                log_group = %self.config.log_group,
                log_stream = %self.config.log_stream,
                "Created CloudWatch log stream"
            ),
            Err(err)
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_resource_already_exists_exception()) => {}
            Err(err) => tracing::warn!(
                log_group = %self.config.log_group,
                log_stream = %self.config.log_stream,
                error = %DisplayErrorContext(&err),
                "Failed to create CloudWatch log stream"
            ),
        }
    }

    async fn ship(&self, line: String) -> Result<(), String> {
        let event = InputLogEvent::builder()
            .message(line)
            .timestamp(Utc::now().timestamp_millis())
            .build()
            .map_err(|e| e.to_string())?;

        self.client
            .put_log_events()
            .log_group_name(&self.config.log_group)
            .log_stream_name(&self.config.log_stream)
            .log_events(event)
            .send()
            .await
            .map_err(|e| DisplayErrorContext(&e).to_string())?;
        Ok(())
    }
}

#[async_trait]
impl EventSink for CloudWatchSink {
    async fn publish(&self, level: EventLevel, message: &str) {
        self.local.publish(level, message).await;

        if let Err(error) = self.ship(format_event(level, message)).await {
            tracing::warn!(
                log_group = %self.config.log_group,
                error = %error,
                "Failed to ship monitor event to CloudWatch"
            );
        }
    }
}
