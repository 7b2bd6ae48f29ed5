// packages/engine/src/main.rs
//! Brandview Mock Engine
//!
//! Serves the fallback routes of the mock API contract over HTTP.

use anyhow::{Context, Result};
use brandview_mock_engine::contract;
use brandview_mock_engine::fallback::{FallbackRouter, FallbackServer};
use brandview_mock_engine::mode::resolve_mode;
use brandview_mock_engine::observability::{init_metrics, init_tracing};
use brandview_mock_engine::utils::config::MockConfig;
use brandview_mock_engine::BuildInfo;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let config = MockConfig::load().context("Failed to load configuration")?;

    init_tracing(&config.logging)?;
    init_metrics(&config.metrics)?;

    let build = BuildInfo::current();
    info!(
        "Starting Brandview mock engine v{} ({})",
        build.version, build.git_hash
    );

    let mode = resolve_mode(&config.mode);
    let registry = Arc::new(contract::registry().context("Invalid handler registry")?);
    info!("Mode: {}, {} routes registered", mode, registry.len());

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("Invalid server address {}", config.server_addr()))?;

    let router = FallbackRouter::new(Arc::clone(&registry), mode);
    let server = FallbackServer::bind(addr, router).await?;

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received shutdown signal, cleaning up...");
    };

    match server.serve_with_shutdown(shutdown_signal).await {
        Ok(()) => {
            info!("Server stopped gracefully");
            Ok(())
        }
        Err(e) => {
            error!("Server error: {}", e);
            Err(e.into())
        }
    }
}
