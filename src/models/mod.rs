//! Response models for the cache server API
//!
//! This module defines the DTOs (Data Transfer Objects) serialized into
//! JSON response bodies. Cached values themselves are served as raw bytes.

pub mod responses;

// Re-export commonly used types
pub use responses::{GroupStatsResponse, HealthResponse, OwnerResponse, StatsResponse};
