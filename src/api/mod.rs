//! API Module
//!
//! HTTP handlers and routing that expose cache groups to peers.
//!
//! # Endpoints
//! - `GET /_groupcache/:group/:key` - Cached bytes of a key
//! - `GET /owner/:key` - Peer owning a key on the ring
//! - `GET /stats` - Per-group statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::{create_router, BASE_PATH};
