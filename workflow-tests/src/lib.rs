//! Cross-service workflow test harness.
//!
//! Runs model-api and monitor-agent in-process on ephemeral ports, wired
//! together the way they are deployed: the agent polls the model's
//! `/predict` endpoint.

use anyhow::{anyhow, Result};
use model_api::config::{LatencyConfig, ModelApiConfig};
use monitor_agent::config::{DriftConfig, MonitorConfig};
use service_core::config::Config;
use std::sync::Once;
use std::time::{Duration, Instant};

static INIT: Once = Once::new();

/// Initialize tracing for tests (only once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,workflow_tests=debug")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Both services running in the background.
pub struct ServiceStack {
    pub model_url: String,
    pub monitor_url: String,
    pub client: reqwest::Client,
}

impl ServiceStack {
    pub async fn spawn(polling_interval: Duration) -> Result<Self> {
        init_tracing();

        let model = model_api::Application::build(ModelApiConfig {
            common: local_server(),
            latency: LatencyConfig::default(),
        })
        .await?;
        let model_url = format!("http://127.0.0.1:{}", model.port());
        tokio::spawn(async move {
            if let Err(e) = model.run_until_stopped().await {
                tracing::error!("model-api stopped: {}", e);
            }
        });

        let monitor = monitor_agent::Application::build(MonitorConfig {
            common: local_server(),
            model_endpoint: format!("{}/predict", model_url),
            polling_interval,
            system_interval: Duration::from_millis(100),
            request_timeout: Duration::from_secs(5),
            drift: DriftConfig::default(),
            max_log_entries: 1000,
            cloudwatch: None,
        })
        .await?;
        let monitor_url = format!("http://127.0.0.1:{}", monitor.port());
        tokio::spawn(async move {
            if let Err(e) = monitor.run_until_stopped().await {
                tracing::error!("monitor-agent stopped: {}", e);
            }
        });

        let client = reqwest::Client::new();
        for url in [&model_url, &monitor_url] {
            wait_for_service(&client, &format!("{}/health", url), Duration::from_secs(5))
                .await?;
        }

        Ok(Self {
            model_url,
            monitor_url,
            client,
        })
    }

    pub async fn monitor_json(&self, path: &str) -> Result<serde_json::Value> {
        let value = self
            .client
            .get(format!("{}{}", self.monitor_url, path))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(value)
    }
}

fn local_server() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
    }
}

/// Poll `health_url` until it answers 2xx or `timeout` elapses.
pub async fn wait_for_service(
    client: &reqwest::Client,
    health_url: &str,
    timeout: Duration,
) -> Result<()> {
    let deadline = Instant::now() + timeout;
    loop {
        match client.get(health_url).send().await {
            Ok(response) if response.status().is_success() => return Ok(()),
            _ if Instant::now() >= deadline => {
                return Err(anyhow!("{} not healthy after {:?}", health_url, timeout))
            }
            _ => tokio::time::sleep(Duration::from_millis(50)).await,
        }
    }
}
