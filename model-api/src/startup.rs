//! Application startup and lifecycle management.

use crate::config::ModelApiConfig;
use crate::handlers;
use crate::services::{metrics, SimulatedModel};
use axum::middleware::from_fn;
use axum::{
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{metrics_middleware, request_id_middleware, trace_layer};
use service_core::shutdown::shutdown_signal;
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ModelApiConfig,
    pub model: SimulatedModel,
}

impl AppState {
    pub fn new(config: ModelApiConfig) -> Result<Self, AppError> {
        let model = SimulatedModel::new(config.latency)?;
        Ok(Self { config, model })
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/predict", post(handlers::predict))
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics))
        .fallback(handlers::not_found)
        .layer(from_fn(metrics_middleware))
        .layer(from_fn(request_id_middleware))
        .layer(trace_layer())
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Bind the listener and assemble the router. Port 0 picks a free port.
    pub async fn build(config: ModelApiConfig) -> Result<Self, AppError> {
        let state = AppState::new(config)?;
        metrics::init_metrics();
        let config = &state.config;

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

        tracing::info!(
            port,
            latency_min_secs = config.latency.min_secs,
            latency_max_secs = config.latency.max_secs,
            "Model API listening"
        );

        let router = build_router(state);

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}
