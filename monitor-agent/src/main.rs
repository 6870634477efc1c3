use monitor_agent::config::MonitorConfig;
use monitor_agent::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let otlp_endpoint = std::env::var("OTLP_ENDPOINT").ok();
    init_tracing("monitor-agent", "info", otlp_endpoint.as_deref());

    let config = MonitorConfig::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    tracing::info!("Starting monitoring agent");
    let application = Application::build(config).await?;
    application.run_until_stopped().await?;

    Ok(())
}
