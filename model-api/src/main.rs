use model_api::config::ModelApiConfig;
use model_api::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let otlp_endpoint = std::env::var("OTLP_ENDPOINT").ok();
    init_tracing("model-api", "info", otlp_endpoint.as_deref());

    let config = ModelApiConfig::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    let application = Application::build(config).await?;
    application.run_until_stopped().await?;

    Ok(())
}
