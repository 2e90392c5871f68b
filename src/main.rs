//! Group Cache - A sharded in-process key/value cache
//!
//! Serves one cache group over HTTP, backed by a slow in-memory "database".

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use group_cache::api::create_router;
use group_cache::{AppState, Config, GroupBuilder, GroupRegistry};

/// Main entry point for the cache node.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Register the served group with its getter
/// 4. Build the peer ring from the configured peer list
/// 5. Start HTTP server on configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "group_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting group cache node");

    let config = Config::from_env();
    info!(
        "Configuration loaded: group={}, cache_bytes={}, port={}, peers={:?}, replicas={}",
        config.group_name, config.cache_bytes, config.server_port, config.peers, config.ring_replicas
    );

    let registry = Arc::new(GroupRegistry::new());
    GroupBuilder::new(&config.group_name)
        .cache_bytes(config.cache_bytes)
        .getter(slow_db())
        .build(&registry);

    let state = AppState::from_config(&config, registry);
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Node {} listening on http://{}", config.self_addr, addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Getter over a fixed score table that takes a while to answer.
fn slow_db() -> impl Fn(&str) -> anyhow::Result<Vec<u8>> + Send + Sync + 'static {
    let db: HashMap<&'static str, &'static str> =
        HashMap::from([("Tom", "630"), ("Jack", "589"), ("Sam", "567")]);

    move |key: &str| {
        info!(key, "[SlowDB] search key");
        std::thread::sleep(Duration::from_millis(50));
        db.get(key)
            .map(|v| v.as_bytes().to_vec())
            .with_context(|| format!("{key} not exist"))
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
