//! Application startup and lifecycle management.

use crate::config::MonitorConfig;
use crate::handlers;
use crate::models::SystemMetrics;
use crate::services::{
    CloudWatchSink, DriftDetector, EventSink, LogStore, ModelClient, Monitor, SystemSampler,
    TracingSink,
};
use axum::middleware::from_fn;
use axum::{routing::get, Router};
use service_core::error::AppError;
use service_core::middleware::{request_id_middleware, trace_layer};
use service_core::shutdown::shutdown_signal;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::RwLock;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: MonitorConfig,
    pub logs: Arc<RwLock<LogStore>>,
    pub system: Arc<RwLock<SystemMetrics>>,
    pub drift: Arc<RwLock<DriftDetector>>,
    pub sink: Arc<dyn EventSink>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: MonitorConfig, sink: Arc<dyn EventSink>) -> Self {
        Self {
            logs: Arc::new(RwLock::new(LogStore::new(config.max_log_entries))),
            system: Arc::new(RwLock::new(SystemMetrics::default())),
            drift: Arc::new(RwLock::new(DriftDetector::new(config.drift))),
            sink,
            started_at: Instant::now(),
            config,
        }
    }

    pub fn monitor(&self) -> Result<Monitor, AppError> {
        let client = ModelClient::new(
            self.config.model_endpoint.clone(),
            self.config.request_timeout,
        )
        .map_err(|e| AppError::ConfigError(anyhow::anyhow!("failed to build HTTP client: {}", e)))?;

        Ok(Monitor::new(
            client,
            self.logs.clone(),
            self.drift.clone(),
            self.sink.clone(),
        ))
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health_check))
        .route("/health", get(handlers::health_check))
        .route("/logs", get(handlers::logs))
        .route("/metrics", get(handlers::system_metrics))
        .route("/drift-metrics", get(handlers::drift_metrics))
        .layer(from_fn(request_id_middleware))
        .layer(trace_layer())
        .with_state(state)
}

async fn sample_system_metrics(
    system: Arc<RwLock<SystemMetrics>>,
    started_at: Instant,
    interval: Duration,
) {
    let mut sampler = SystemSampler::new(started_at);
    let mut ticker = tokio::time::interval(interval);
    loop {
        ticker.tick().await;
        let metrics = sampler.sample();
        *system.write().await = metrics;
    }
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
    monitor: Monitor,
}

impl Application {
    /// Build with events shipped to CloudWatch when configured, otherwise
    /// to the local log only.
    pub async fn build(config: MonitorConfig) -> Result<Self, AppError> {
        config.validate()?;
        let sink: Arc<dyn EventSink> = match config.cloudwatch.clone() {
            Some(destination) => {
                tracing::info!(
                    log_group = %destination.log_group,
                    log_stream = %destination.log_stream,
                    "Shipping monitor events to CloudWatch"
                );
                Arc::new(CloudWatchSink::connect(destination).await)
            }
            None => Arc::new(TracingSink),
        };
        Self::build_with_sink(config, sink).await
    }

    /// Build with a custom event destination.
    pub async fn build_with_sink(
        config: MonitorConfig,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, AppError> {
        config.validate()?;

        let host: std::net::IpAddr = config.common.host.parse().map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!(
                "invalid host '{}': {}",
                config.common.host,
                e
            ))
        })?;
        let addr = SocketAddr::new(host, config.common.port);
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        let state = AppState::new(config, sink);
        let monitor = state.monitor()?;

        tracing::info!(
            port,
            model_endpoint = %state.config.model_endpoint,
            "Monitor agent listening"
        );

        Ok(Self {
            port,
            listener,
            state,
            monitor,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Serve the dashboard API while the poll and sampling loops run in the
    /// background. Both loops stop with the server.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let poller = tokio::spawn(
            self.monitor
                .clone()
                .run(self.state.config.polling_interval),
        );
        let sampler = tokio::spawn(sample_system_metrics(
            self.state.system.clone(),
            self.state.started_at,
            self.state.config.system_interval,
        ));

        let router = build_router(self.state);
        let result = axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await;

        poller.abort();
        sampler.abort();

        result
    }
}
