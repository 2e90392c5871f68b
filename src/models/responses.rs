//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing JSON response bodies.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for the owner lookup (GET /owner/:key)
#[derive(Debug, Clone, Serialize)]
pub struct OwnerResponse {
    /// The requested key
    pub key: String,
    /// Peer owning the key, None when the ring is empty
    pub peer: Option<String>,
}

impl OwnerResponse {
    /// Creates a new OwnerResponse
    pub fn new(key: impl Into<String>, peer: Option<&str>) -> Self {
        Self {
            key: key.into(),
            peer: peer.map(String::from),
        }
    }
}

/// Statistics of a single group
#[derive(Debug, Clone, Serialize)]
pub struct GroupStatsResponse {
    /// Group name
    pub name: String,
    #[serde(flatten)]
    pub stats: CacheStats,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl GroupStatsResponse {
    /// Creates a new GroupStatsResponse from a stats snapshot
    pub fn new(name: impl Into<String>, stats: CacheStats) -> Self {
        Self {
            name: name.into(),
            hit_rate: stats.hit_rate(),
            stats,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// One entry per registered group, ordered by name
    pub groups: Vec<GroupStatsResponse>,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
