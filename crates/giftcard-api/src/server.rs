//! HTTP server startup

use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::config::ServerConfig;
use crate::handler::{create_router, AppState};

/// Router with state and the layers the configuration asks for
pub fn build_app(config: &ServerConfig) -> anyhow::Result<Router> {
    let state = Arc::new(AppState::new(config.metrics_enabled)?);
    let router = create_router(state);

    Ok(if config.cors_permissive {
        router.layer(CorsLayer::permissive())
    } else {
        router
    })
}

/// Bind and serve until ctrl-c
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr()?;
    let app = build_app(&config)?;

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        addr = %addr,
        metrics_enabled = config.metrics_enabled,
        cors_permissive = config.cors_permissive,
        "Starting giftcard server"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutting down giftcard server");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
