//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use parking_lot::RwLock;
use tracing::debug;

use crate::config::Config;
use crate::error::{GroupError, Result};
use crate::group::GroupRegistry;
use crate::models::{GroupStatsResponse, HealthResponse, OwnerResponse, StatsResponse};
use crate::ring::HashRing;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Groups served by this node
    pub registry: Arc<GroupRegistry>,
    /// Peer ring deciding which node owns a key
    pub ring: Arc<RwLock<HashRing>>,
}

impl AppState {
    /// Creates a new AppState from a registry and a ring.
    pub fn new(registry: Arc<GroupRegistry>, ring: HashRing) -> Self {
        Self {
            registry,
            ring: Arc::new(RwLock::new(ring)),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds the ring from the configured peer list.
    pub fn from_config(config: &Config, registry: Arc<GroupRegistry>) -> Self {
        let mut ring = HashRing::new(config.ring_replicas, None);
        ring.add(&config.peers);
        Self::new(registry, ring)
    }
}

/// Handler for GET /_groupcache/:group/:key
///
/// Serves the raw bytes of `key` from the named group. The group's getter
/// may block, so the lookup runs on the blocking thread pool.
pub async fn group_handler(
    State(state): State<AppState>,
    Path((group_name, key)): Path<(String, String)>,
) -> Result<impl IntoResponse> {
    let group = state
        .registry
        .get_group(&group_name)
        .ok_or(GroupError::GroupNotFound(group_name))?;

    let value = tokio::task::spawn_blocking(move || group.get(&key))
        .await
        .map_err(|err| anyhow::anyhow!("lookup task failed: {err}"))??;

    Ok((
        [(header::CONTENT_TYPE, "application/octet-stream")],
        value.to_bytes(),
    ))
}

/// Handler for GET /owner/:key
///
/// Reports which peer the ring assigns `key` to.
pub async fn owner_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<OwnerResponse> {
    let ring = state.ring.read();
    let peer = ring.get(&key);
    debug!(key = %key, ?peer, "Resolved key owner");

    Json(OwnerResponse::new(&key, peer))
}

/// Handler for GET /stats
///
/// Returns statistics of every registered group.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let groups = state
        .registry
        .groups()
        .iter()
        .map(|group| GroupStatsResponse::new(group.name(), group.stats()))
        .collect();

    Json(StatsResponse { groups })
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
