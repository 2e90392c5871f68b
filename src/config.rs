//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Byte budget of the served group's cache (0 = unbounded)
    pub cache_bytes: u64,
    /// Name of the served group
    pub group_name: String,
    /// HTTP server port
    pub server_port: u16,
    /// Address this node is known by on the ring
    pub self_addr: String,
    /// All peer addresses placed on the ring, this node included
    pub peers: Vec<String>,
    /// Virtual nodes per peer
    pub ring_replicas: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_BYTES` - Cache byte budget (default: 2048)
    /// - `GROUP_NAME` - Served group name (default: scores)
    /// - `SERVER_PORT` - HTTP server port (default: 8001)
    /// - `SELF_ADDR` - This node's ring address (default: http://localhost:8001)
    /// - `PEERS` - Comma separated ring addresses (default: `SELF_ADDR`)
    /// - `RING_REPLICAS` - Virtual nodes per peer (default: 50)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let self_addr = env::var("SELF_ADDR").unwrap_or(defaults.self_addr);
        let peers = env::var("PEERS")
            .ok()
            .map(|v| parse_peers(&v))
            .filter(|peers| !peers.is_empty())
            .unwrap_or_else(|| vec![self_addr.clone()]);

        Self {
            cache_bytes: env::var("CACHE_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_bytes),
            group_name: env::var("GROUP_NAME").unwrap_or(defaults.group_name),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            self_addr,
            peers,
            ring_replicas: env::var("RING_REPLICAS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.ring_replicas),
        }
    }
}

/// Splits a comma separated peer list, dropping blanks.
fn parse_peers(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        let self_addr = "http://localhost:8001".to_string();
        Self {
            cache_bytes: 2 << 10,
            group_name: "scores".to_string(),
            server_port: 8001,
            peers: vec![self_addr.clone()],
            self_addr,
            ring_replicas: 50,
        }
    }
}
