use service_core::config::{self as core_config, get_env, get_env_parsed};
use service_core::error::AppError;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub common: core_config::Config,
    pub model_endpoint: String,
    pub polling_interval: Duration,
    pub system_interval: Duration,
    pub request_timeout: Duration,
    pub drift: DriftConfig,
    /// Oldest log entries are dropped past this many.
    pub max_log_entries: usize,
    /// Ship monitor events to CloudWatch Logs when set.
    pub cloudwatch: Option<CloudWatchConfig>,
}

/// Destination of shipped monitor events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudWatchConfig {
    pub log_group: String,
    pub log_stream: String,
}

impl CloudWatchConfig {
    /// Both names or neither. Blank values count as unset.
    pub fn from_parts(
        log_group: Option<String>,
        log_stream: Option<String>,
    ) -> Result<Option<Self>, AppError> {
        let log_group = log_group.filter(|v| !v.trim().is_empty());
        let log_stream = log_stream.filter(|v| !v.trim().is_empty());
        match (log_group, log_stream) {
            (Some(log_group), Some(log_stream)) => Ok(Some(Self {
                log_group,
                log_stream,
            })),
            (None, None) => Ok(None),
            _ => Err(AppError::ConfigError(anyhow::anyhow!(
                "MONITOR_CLOUDWATCH_LOG_GROUP and MONITOR_CLOUDWATCH_LOG_STREAM must be set together"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftConfig {
    /// Fraction of the window that must flip label to count as drift.
    pub drift_threshold: f64,
    pub confidence_threshold: f64,
    pub max_response_time_secs: f64,
    pub window_size: usize,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            drift_threshold: 0.5,
            confidence_threshold: 0.8,
            max_response_time_secs: 1.0,
            window_size: 10,
        }
    }
}

impl DriftConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.window_size == 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "drift window size must be at least 1"
            )));
        }
        let thresholds = [
            self.drift_threshold,
            self.confidence_threshold,
            self.max_response_time_secs,
        ];
        if thresholds.iter().any(|t| !t.is_finite() || *t < 0.0) {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "drift thresholds must be non-negative numbers"
            )));
        }
        Ok(())
    }
}

impl MonitorConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load(DEFAULT_PORT)?;
        let is_prod = core_config::is_prod();
        let drift_defaults = DriftConfig::default();

        let config = Self {
            common,
            model_endpoint: get_env(
                "MONITOR_MODEL_ENDPOINT",
                Some("http://127.0.0.1:5000/predict"),
                is_prod,
            )?,
            polling_interval: Duration::from_millis(get_env_parsed(
                "MONITOR_POLLING_INTERVAL_MS",
                "5000",
                is_prod,
            )?),
            system_interval: Duration::from_millis(get_env_parsed(
                "MONITOR_SYSTEM_INTERVAL_MS",
                "1000",
                is_prod,
            )?),
            request_timeout: Duration::from_millis(get_env_parsed(
                "MONITOR_REQUEST_TIMEOUT_MS",
                "10000",
                is_prod,
            )?),
            drift: DriftConfig {
                drift_threshold: get_env_parsed(
                    "MONITOR_DRIFT_THRESHOLD",
                    &drift_defaults.drift_threshold.to_string(),
                    is_prod,
                )?,
                confidence_threshold: get_env_parsed(
                    "MONITOR_CONFIDENCE_THRESHOLD",
                    &drift_defaults.confidence_threshold.to_string(),
                    is_prod,
                )?,
                max_response_time_secs: get_env_parsed(
                    "MONITOR_MAX_RESPONSE_TIME_SECS",
                    &drift_defaults.max_response_time_secs.to_string(),
                    is_prod,
                )?,
                window_size: get_env_parsed(
                    "MONITOR_WINDOW_SIZE",
                    &drift_defaults.window_size.to_string(),
                    is_prod,
                )?,
            },
            max_log_entries: get_env_parsed("MONITOR_MAX_LOG_ENTRIES", "1000", is_prod)?,
            cloudwatch: CloudWatchConfig::from_parts(
                std::env::var("MONITOR_CLOUDWATCH_LOG_GROUP").ok(),
                std::env::var("MONITOR_CLOUDWATCH_LOG_STREAM").ok(),
            )?,
        };
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        self.drift.validate()?;
        if self.polling_interval.is_zero() || self.system_interval.is_zero() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "polling intervals must be greater than zero"
            )));
        }
        if self.max_log_entries == 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "MONITOR_MAX_LOG_ENTRIES must be at least 1"
            )));
        }
        Ok(())
    }
}
