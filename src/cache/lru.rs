//! LRU Cache Module
//!
//! Byte-bounded least-recently-used cache. It is not safe for concurrent
//! access; see [`SharedCache`](crate::cache::SharedCache) for the locked wrapper.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::cache::ByteLen;

/// Callback run with the key and value of every evicted entry.
pub type OnEvicted<V> = Box<dyn FnMut(String, V) + Send>;

// == Recency List Node ==
#[derive(Debug)]
struct Node<V> {
    key: String,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

// == LRU Cache ==
/// Byte-bounded LRU cache keyed by string.
///
/// Nodes live in a dense `Vec` and are linked by index:
/// - `head` = most recently used
/// - `tail` = least recently used
///
/// Every entry costs `key.len() + value.byte_len()` bytes. A `max_bytes` of 0
/// disables eviction entirely.
pub struct LruCache<V> {
    /// Byte budget, 0 = unbounded
    max_bytes: u64,
    /// Bytes accounted to live entries
    used_bytes: u64,
    /// Recency list storage
    nodes: Vec<Node<V>>,
    head: Option<usize>,
    tail: Option<usize>,
    /// Key to node position
    index: HashMap<String, usize>,
    /// Number of entries removed by `remove_oldest`
    evictions: u64,
    on_evicted: Option<OnEvicted<V>>,
}

impl<V: ByteLen> LruCache<V> {
    // == Constructor ==
    /// Creates a cache holding at most `max_bytes` bytes (0 = unbounded).
    ///
    /// # Arguments
    /// * `max_bytes` - Byte budget for keys plus values
    /// * `on_evicted` - Optional callback invoked after each eviction
    pub fn new(max_bytes: u64, on_evicted: Option<OnEvicted<V>>) -> Self {
        Self {
            max_bytes,
            used_bytes: 0,
            nodes: Vec::new(),
            head: None,
            tail: None,
            index: HashMap::new(),
            evictions: 0,
            on_evicted,
        }
    }

    // == Add ==
    /// Inserts or replaces `key`, marking it most recently used.
    ///
    /// Replacing a value applies the size difference between the old and new
    /// value. Afterwards least recently used entries are evicted until the
    /// cache fits its budget again. An entry larger than the whole budget is
    /// kept once it is the only one left.
    pub fn add(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();

        if let Some(&id) = self.index.get(&key) {
            self.move_to_front(id);
            let new_len = value.byte_len() as u64;
            let old = std::mem::replace(&mut self.nodes[id].value, value);
            self.used_bytes -= old.byte_len() as u64;
            self.used_bytes += new_len;
        } else {
            self.used_bytes += (key.len() + value.byte_len()) as u64;
            let id = self.nodes.len();
            self.nodes.push(Node {
                key: key.clone(),
                value,
                prev: None,
                next: None,
            });
            self.push_front(id);
            self.index.insert(key, id);
        }

        while self.max_bytes != 0 && self.used_bytes > self.max_bytes && self.nodes.len() > 1 {
            self.remove_oldest();
        }
    }

    // == Get ==
    /// Looks up `key` and marks it most recently used.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.move_to_front(id);
        Some(&self.nodes[id].value)
    }

    // == Remove Oldest ==
    /// Evicts the least recently used entry, if any.
    ///
    /// The eviction callback runs after the entry is unlinked and the byte
    /// count is updated.
    pub fn remove_oldest(&mut self) {
        let Some(id) = self.tail else {
            return;
        };

        let node = self.detach(id);
        self.used_bytes -= (node.key.len() + node.value.byte_len()) as u64;
        self.evictions += 1;
        debug!(key = %node.key, used_bytes = self.used_bytes, "Evicted least recently used entry");

        if let Some(on_evicted) = self.on_evicted.as_mut() {
            on_evicted(node.key, node.value);
        }
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without touching it.
    pub fn peek_oldest(&self) -> Option<&str> {
        self.tail.map(|id| self.nodes[id].key.as_str())
    }

    // == Contains ==
    /// Checks for `key` without touching it.
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    // == Length ==
    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Bytes currently accounted to keys and values.
    pub fn used_bytes(&self) -> u64 {
        self.used_bytes
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Total entries evicted since construction.
    pub fn evictions(&self) -> u64 {
        self.evictions
    }

    // == List Plumbing ==
    fn push_front(&mut self, id: usize) {
        self.nodes[id].prev = None;
        self.nodes[id].next = self.head;
        match self.head {
            Some(head) => self.nodes[head].prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }

    fn unlink(&mut self, id: usize) {
        let (prev, next) = (self.nodes[id].prev, self.nodes[id].next);
        match prev {
            Some(p) => self.nodes[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.nodes[n].prev = prev,
            None => self.tail = prev,
        }
        self.nodes[id].prev = None;
        self.nodes[id].next = None;
    }

    fn move_to_front(&mut self, id: usize) {
        if self.head == Some(id) {
            return;
        }
        self.unlink(id);
        self.push_front(id);
    }

    /// Unlinks and removes node `id`, relinking whichever node `swap_remove`
    /// moves into its slot.
    fn detach(&mut self, id: usize) -> Node<V> {
        self.unlink(id);
        let node = self.nodes.swap_remove(id);
        self.index.remove(&node.key);

        if id < self.nodes.len() {
            let (prev, next) = (self.nodes[id].prev, self.nodes[id].next);
            match prev {
                Some(p) => self.nodes[p].next = Some(id),
                None => self.head = Some(id),
            }
            match next {
                Some(n) => self.nodes[n].prev = Some(id),
                None => self.tail = Some(id),
            }
            if let Some(slot) = self.index.get_mut(&self.nodes[id].key) {
                *slot = id;
            }
        }

        node
    }

    /// Keys from most to least recently used.
    #[cfg(test)]
    pub(crate) fn keys_by_recency(&self) -> Vec<String> {
        let mut keys = Vec::with_capacity(self.nodes.len());
        let mut cursor = self.head;
        while let Some(id) = cursor {
            keys.push(self.nodes[id].key.clone());
            cursor = self.nodes[id].next;
        }
        keys
    }

    /// Panics if the list, the index and the byte count disagree.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        let keys = self.keys_by_recency();
        assert_eq!(keys.len(), self.nodes.len(), "list length mismatch");
        assert_eq!(self.index.len(), self.nodes.len(), "index length mismatch");
        for key in &keys {
            let id = self.index[key];
            assert_eq!(&self.nodes[id].key, key, "index points at wrong node");
        }
        let expected: u64 = self
            .nodes
            .iter()
            .map(|n| (n.key.len() + n.value.byte_len()) as u64)
            .sum();
        assert_eq!(self.used_bytes, expected, "byte accounting drifted");
    }
}

impl<V> fmt::Debug for LruCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("max_bytes", &self.max_bytes)
            .field("used_bytes", &self.used_bytes)
            .field("len", &self.nodes.len())
            .field("evictions", &self.evictions)
            .finish()
    }
}
