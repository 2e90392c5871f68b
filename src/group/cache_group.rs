//! Cache Group Module
//!
//! A named cache namespace backed by a getter.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::{ByteView, CacheStats, SharedCache, StatsCounter};
use crate::error::{GroupError, Result};
use crate::group::Getter;

// == Group ==
/// A cache namespace: a byte-bounded cache in front of a getter.
///
/// Groups are created through a [`GroupRegistry`](crate::group::GroupRegistry)
/// and shared as `Arc<Group>`. Concurrent misses on the same key are not
/// coalesced; each caller runs the getter.
pub struct Group {
    name: String,
    getter: Arc<dyn Getter>,
    main_cache: SharedCache<ByteView>,
    stats: StatsCounter,
}

impl Group {
    pub(crate) fn new(name: String, cache_bytes: u64, getter: Arc<dyn Getter>) -> Self {
        Self {
            name,
            getter,
            main_cache: SharedCache::new(cache_bytes),
            stats: StatsCounter::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // == Get ==
    /// Returns the value for `key`, loading and caching it on a miss.
    ///
    /// # Errors
    /// - [`GroupError::EmptyKey`] if `key` is empty
    /// - [`GroupError::Load`] with the getter's own error if loading fails
    pub fn get(&self, key: &str) -> Result<ByteView> {
        if key.is_empty() {
            return Err(GroupError::EmptyKey);
        }

        if let Some(value) = self.main_cache.get(key) {
            self.stats.record_hit();
            debug!(group = %self.name, key, "Cache hit");
            return Ok(value);
        }

        self.stats.record_miss();
        self.load(key)
    }

    /// Runs the getter outside the cache lock and stores a private copy of
    /// the result.
    fn load(&self, key: &str) -> Result<ByteView> {
        let bytes = match self.getter.get(key) {
            Ok(bytes) => bytes,
            Err(err) => {
                self.stats.record_load_error();
                warn!(group = %self.name, key, error = %err, "Getter failed");
                return Err(GroupError::Load(err));
            }
        };

        self.stats.record_load();
        let value = ByteView::copy_from(&bytes);
        self.populate_cache(key, value.clone());
        Ok(value)
    }

    fn populate_cache(&self, key: &str, value: ByteView) {
        self.main_cache.add(key, value);
    }

    // == Stats ==
    /// Returns current counters together with cache occupancy.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.snapshot();
        stats.evictions = self.main_cache.evictions();
        stats.total_entries = self.main_cache.len();
        stats.used_bytes = self.main_cache.used_bytes();
        stats.cache_bytes = self.main_cache.cache_bytes();
        stats
    }
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("name", &self.name)
            .field("main_cache", &self.main_cache)
            .finish_non_exhaustive()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn scores() -> HashMap<&'static str, &'static str> {
        HashMap::from([("Tom", "630"), ("Jack", "589"), ("Sam", "567")])
    }

    fn counting_group(cache_bytes: u64) -> (Group, Arc<HashMap<String, AtomicUsize>>) {
        let db = scores();
        let counts: Arc<HashMap<String, AtomicUsize>> = Arc::new(
            db.keys()
                .map(|k| (k.to_string(), AtomicUsize::new(0)))
                .collect(),
        );
        let seen = Arc::clone(&counts);
        let getter = move |key: &str| -> anyhow::Result<Vec<u8>> {
            match db.get(key) {
                Some(v) => {
                    seen[key].fetch_add(1, Ordering::SeqCst);
                    Ok(v.as_bytes().to_vec())
                }
                None => anyhow::bail!("{key} not exist"),
            }
        };
        (
            Group::new("scores".into(), cache_bytes, Arc::new(getter)),
            counts,
        )
    }

    #[test]
    fn test_group_loads_once_then_hits() {
        let (group, counts) = counting_group(2 << 10);

        for (name, score) in scores() {
            assert_eq!(group.get(name).unwrap().to_string(), score);
            assert_eq!(group.get(name).unwrap().to_string(), score);
            assert_eq!(counts[name].load(Ordering::SeqCst), 1, "{name} loaded twice");
        }

        let stats = group.stats();
        assert_eq!(stats.hits, 3);
        assert_eq!(stats.misses, 3);
        assert_eq!(stats.loads, 3);
        assert_eq!(stats.total_entries, 3);
    }

    #[test]
    fn test_group_unknown_key_is_not_cached() {
        let (group, _) = counting_group(2 << 10);

        let err = group.get("unknown").unwrap_err();
        assert!(matches!(err, GroupError::Load(_)));
        assert_eq!(err.to_string(), "unknown not exist");

        let stats = group.stats();
        assert_eq!(stats.load_errors, 1);
        assert_eq!(stats.total_entries, 0);
    }

    #[test]
    fn test_group_empty_key() {
        let (group, counts) = counting_group(0);
        assert!(matches!(group.get(""), Err(GroupError::EmptyKey)));
        assert!(counts.values().all(|c| c.load(Ordering::SeqCst) == 0));
    }

    #[test]
    fn test_group_small_budget_reloads_evicted_keys() {
        // room for one entry: "Tom" + "630" = 6 bytes
        let (group, counts) = counting_group(6);

        group.get("Tom").unwrap();
        group.get("Sam").unwrap();
        group.get("Tom").unwrap();

        assert_eq!(counts["Tom"].load(Ordering::SeqCst), 2);
        assert_eq!(group.stats().evictions, 2);
    }

    #[test]
    fn test_group_value_is_copied_from_getter() {
        let group = Group::new(
            "copy".into(),
            0,
            Arc::new(|_key: &str| -> anyhow::Result<Vec<u8>> { Ok(vec![1, 2, 3]) }),
        );

        let loaded = group.get("k").unwrap();
        let cached = group.get("k").unwrap();
        assert_eq!(loaded.byte_slice(), vec![1, 2, 3]);
        assert_eq!(loaded, cached);
    }
}
