use std::sync::Arc;

use academy_portal::config::PortalConfig;
use academy_portal::course_label::PolicyStore;
use academy_portal::server::create_router;
use academy_portal::types::PortalState;
use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = PortalConfig::load().context("Failed to load configuration")?;
    info!("Starting portal server with {:?}", config);

    let state = Arc::new(PortalState::new(PolicyStore::new(
        &config.policy_file,
        config.policy_ttl,
    )));

    // Pages still render without a policy table, just with empty policy text
    if let Err(e) = state.policy_store.reload() {
        if e.is_missing_file() {
            warn!(
                "Policy file {} not found, serving empty policy text",
                config.policy_file.display()
            );
        } else {
            warn!("Failed to load policy table at startup: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind((config.address.as_str(), config.port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", config.address, config.port))?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
}
