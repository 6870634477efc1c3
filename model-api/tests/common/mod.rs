use model_api::config::{LatencyConfig, ModelApiConfig};
use model_api::{AppState, Application};
use service_core::config::Config;

pub fn test_config(latency: LatencyConfig) -> ModelApiConfig {
    ModelApiConfig {
        common: Config {
            host: "127.0.0.1".to_string(),
            port: 0, // Random port
        },
        latency,
    }
}

pub fn test_state() -> AppState {
    AppState::new(test_config(LatencyConfig::default())).expect("Failed to build test state")
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(LatencyConfig::default()).await
    }

    pub async fn spawn_with(latency: LatencyConfig) -> Self {
        let app = Application::build(test_config(latency))
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to answer before handing it out
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp { address, port }
    }
}
