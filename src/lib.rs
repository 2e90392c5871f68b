//! Group Cache - A sharded in-process key/value cache
//!
//! Provides byte-bounded LRU eviction, consistent hashing over peers and
//! named cache groups that load missing keys through a getter.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod group;
pub mod models;
pub mod ring;

pub use api::AppState;
pub use cache::ByteView;
pub use config::Config;
pub use error::GroupError;
pub use group::{Getter, Group, GroupBuilder, GroupRegistry};
pub use ring::HashRing;
