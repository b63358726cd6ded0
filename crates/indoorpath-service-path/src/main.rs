//! Entry point for the indoor path-finding service.
//!
//! Configuration comes from the environment; see
//! [`indoorpath_service_shared::config`] for the full list.

use std::net::SocketAddr;

use tracing::{error, info, warn};

use indoorpath_service_path::app;
use indoorpath_service_shared::{
    init_logging, init_metrics, AppState, LoggingConfig, MetricsConfig, ServiceConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env().with_service("path");
    let _root_span = init_logging(&logging_config);

    let metrics_config = MetricsConfig::from_env();
    if metrics_config.enabled {
        if let Err(e) = init_metrics(&metrics_config) {
            warn!(error = %e, "failed to initialize metrics, continuing without metrics");
        }
    }

    let config = ServiceConfig::from_env().map_err(|e| {
        error!(error = %e, "invalid configuration");
        e
    })?;

    info!(
        data_path = %config.data_path.display(),
        port = config.port,
        timezone = %config.timezone,
        max_subgraph_depth = config.max_subgraph_depth,
        "starting path service"
    );

    let state = AppState::load(&config).map_err(|e| {
        error!(error = %e, path = %config.data_path.display(), "failed to load application state");
        e
    })?;

    info!(
        nodes = state.map().node_count(),
        landmarks = state.map().landmark_count(),
        "application state loaded"
    );

    let router = app(state, &metrics_config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("path service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
    }
}
