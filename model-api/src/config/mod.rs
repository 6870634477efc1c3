use service_core::config::{self as core_config, get_env_parsed};
use service_core::error::AppError;

/// Port the prediction service listens on unless `APP__PORT` overrides it.
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone)]
pub struct ModelApiConfig {
    pub common: core_config::Config,
    pub latency: LatencyConfig,
}

/// Bounds of the simulated inference delay, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatencyConfig {
    pub min_secs: f64,
    pub max_secs: f64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            min_secs: 0.1,
            max_secs: 0.5,
        }
    }
}

impl LatencyConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if !self.min_secs.is_finite() || !self.max_secs.is_finite() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "latency bounds must be finite numbers"
            )));
        }
        if self.min_secs < 0.0 || self.min_secs > self.max_secs {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "latency bounds must satisfy 0 <= min ({}) <= max ({})",
                self.min_secs,
                self.max_secs
            )));
        }
        Ok(())
    }
}

impl ModelApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load(DEFAULT_PORT)?;
        let is_prod = core_config::is_prod();
        let defaults = LatencyConfig::default();

        let latency = LatencyConfig {
            min_secs: get_env_parsed(
                "MODEL_LATENCY_MIN_SECS",
                &defaults.min_secs.to_string(),
                is_prod,
            )?,
            max_secs: get_env_parsed(
                "MODEL_LATENCY_MAX_SECS",
                &defaults.max_secs.to_string(),
                is_prod,
            )?,
        };
        latency.validate()?;

        Ok(Self { common, latency })
    }
}
