//! ludex gateway entry point.
//!
//! Boots the HTTP server: loads layered configuration, opens the SQLite
//! store (running migrations), builds the upstream catalog client, and
//! serves the router until SIGINT/SIGTERM.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use ludex_client::{CatalogClient, CatalogConfig};
use ludex_core::{AppConfig, CacheDb};

mod enrich;
mod error;
mod routes;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;
    tracing::info!(
        "starting ludex gateway: bind={} db={} ttl={}s",
        config.bind_addr,
        config.db_path.display(),
        config.cache_ttl_seconds
    );

    let db = CacheDb::open(&config.db_path)
        .await
        .context("failed to open cache database")?;

    let api_key = config
        .require_rawg_api_key()
        .context("catalog API key is required")?
        .to_string();
    let client = CatalogClient::new(CatalogConfig {
        api_key,
        base_url: config.base_url.clone(),
        timeout: config.timeout(),
        user_agent: config.user_agent.clone(),
        min_request_interval: config.min_request_interval(),
    })
    .context("failed to build catalog client")?;

    let state = routes::AppState { db, client, config: Arc::new(config.clone()) };
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("ludex gateway stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
