//! Shared Cache Module
//!
//! Mutex-guarded wrapper that makes [`LruCache`] usable from many threads.

use parking_lot::Mutex;

use crate::cache::{ByteLen, LruCache};

// == Shared Cache ==
/// Thread-safe wrapper around a lazily built [`LruCache`].
///
/// Reads take the same exclusive lock as writes because a hit reorders the
/// recency list. The inner cache does not exist until the first `add`, so a
/// default-constructed wrapper is valid and simply misses.
#[derive(Debug, Default)]
pub struct SharedCache<V> {
    /// Byte budget handed to the inner cache
    cache_bytes: u64,
    lru: Mutex<Option<LruCache<V>>>,
}

impl<V: ByteLen + Clone> SharedCache<V> {
    // == Constructor ==
    /// Creates a wrapper whose inner cache will hold at most `cache_bytes`.
    pub fn new(cache_bytes: u64) -> Self {
        Self {
            cache_bytes,
            lru: Mutex::new(None),
        }
    }

    // == Add ==
    /// Stores `value` under `key`, building the inner cache on first use.
    pub fn add(&self, key: &str, value: V) {
        let mut lru = self.lru.lock();
        lru.get_or_insert_with(|| LruCache::new(self.cache_bytes, None))
            .add(key, value);
    }

    // == Get ==
    /// Returns a clone of the cached value and marks it most recently used.
    pub fn get(&self, key: &str) -> Option<V> {
        let mut lru = self.lru.lock();
        lru.as_mut()?.get(key).cloned()
    }

    pub fn cache_bytes(&self) -> u64 {
        self.cache_bytes
    }

    /// Number of cached entries (0 before the first `add`).
    pub fn len(&self) -> usize {
        self.lru.lock().as_ref().map_or(0, LruCache::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn used_bytes(&self) -> u64 {
        self.lru.lock().as_ref().map_or(0, LruCache::used_bytes)
    }

    pub fn evictions(&self) -> u64 {
        self.lru.lock().as_ref().map_or(0, LruCache::evictions)
    }
}
