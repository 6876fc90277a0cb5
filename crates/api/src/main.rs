//! Covera - insurance brokerage backend
//!
//! Loads configuration, opens the database and serves the HTTP API.

use std::sync::Arc;

use anyhow::Context;
use covera_api::utils::logging::init_tracing;
use covera_api::{router, AppContext};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env must be loaded before the config loader reads the environment
    let dotenv = dotenvy::dotenv();

    let config = covera_infra::config::load().context("loading configuration")?;
    init_tracing(&config.logging);

    match dotenv {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(e) => warn!(error = %e, "no .env file loaded"),
    }

    let ctx = Arc::new(AppContext::new(config).context("initialising application context")?);
    let bind_addr = ctx.config.server.bind_addr.clone();

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {bind_addr}"))?;
    info!(addr = %bind_addr, "covera listening");

    axum::serve(listener, router(ctx)).with_graceful_shutdown(shutdown_signal()).await?;

    info!("covera stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
    }
}
