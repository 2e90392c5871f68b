//! Cache Module
//!
//! Byte-bounded LRU eviction, its thread-safe wrapper and the value types
//! stored in it.

mod byteview;
mod lru;
mod shared;
mod stats;


// Re-export public types
pub use byteview::{ByteLen, ByteView};
pub use lru::{LruCache, OnEvicted};
pub use shared::SharedCache;
pub use stats::{CacheStats, StatsCounter};
