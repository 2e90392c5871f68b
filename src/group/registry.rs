//! Group Registry Module
//!
//! Name-based lookup of cache groups, plus a builder for creating them.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};

use crate::group::{Getter, Group};

// == Group Registry ==
/// Maps group names to groups.
///
/// Create one per process (or per test) and share it by `Arc`. Creating a
/// group takes the write lock; lookups take the read lock. Neither lock is
/// held while a group serves a lookup.
#[derive(Debug, Default)]
pub struct GroupRegistry {
    groups: RwLock<HashMap<String, Arc<Group>>>,
}

impl GroupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // == New Group ==
    /// Creates a group and registers it under `name`, replacing any group
    /// already registered under that name.
    ///
    /// # Arguments
    /// * `name` - Namespace name
    /// * `cache_bytes` - Byte budget of the group's cache, 0 = unbounded
    /// * `getter` - Loader called on cache misses
    pub fn new_group(
        &self,
        name: impl Into<String>,
        cache_bytes: u64,
        getter: impl Getter + 'static,
    ) -> Arc<Group> {
        self.register(Group::new(name.into(), cache_bytes, Arc::new(getter)))
    }

    fn register(&self, group: Group) -> Arc<Group> {
        let group = Arc::new(group);
        let previous = self
            .groups
            .write()
            .insert(group.name().to_string(), Arc::clone(&group));

        if previous.is_some() {
            warn!(group = group.name(), "Replaced existing cache group");
        }
        info!(group = group.name(), "Registered cache group");
        group
    }

    // == Get Group ==
    /// Returns the group registered under `name`, if any.
    pub fn get_group(&self, name: &str) -> Option<Arc<Group>> {
        self.groups.read().get(name).cloned()
    }

    /// All registered groups, ordered by name.
    pub fn groups(&self) -> Vec<Arc<Group>> {
        let mut groups: Vec<Arc<Group>> = self.groups.read().values().cloned().collect();
        groups.sort_by(|a, b| a.name().cmp(b.name()));
        groups
    }

    pub fn len(&self) -> usize {
        self.groups.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.read().is_empty()
    }
}

// == Group Builder ==
/// Step-by-step group construction for configuration-driven setup.
///
/// # Panics
/// [`build`](GroupBuilder::build) panics if no getter was supplied: a group
/// without a getter can never resolve a miss.
#[derive(Default)]
pub struct GroupBuilder {
    name: String,
    cache_bytes: u64,
    getter: Option<Arc<dyn Getter>>,
}

impl GroupBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Byte budget of the group's cache, 0 = unbounded.
    pub fn cache_bytes(mut self, cache_bytes: u64) -> Self {
        self.cache_bytes = cache_bytes;
        self
    }

    pub fn getter(mut self, getter: impl Getter + 'static) -> Self {
        self.getter = Some(Arc::new(getter));
        self
    }

    /// Creates the group and registers it in `registry`.
    pub fn build(self, registry: &GroupRegistry) -> Arc<Group> {
        let Some(getter) = self.getter else {
            panic!("cache group {:?} has no getter", self.name);
        };
        registry.register(Group::new(self.name, self.cache_bytes, getter))
    }
}
