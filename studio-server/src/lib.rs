pub mod app;
pub mod config;
pub mod http;
pub mod logging;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

use crate::app::AppState;
use crate::config::ServerConfig;

/// Open storage and mail, then serve the API until ctrl-c.
pub async fn serve(config: &ServerConfig) -> Result<()> {
    let addr = config.bind_addr()?;
    let state: Arc<AppState> = AppState::from_config(config).await?;
    let app = http::router(state);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(?error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
