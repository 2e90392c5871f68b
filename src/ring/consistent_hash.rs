//! Consistent Hash Ring
//!
//! Maps keys onto named nodes through a sorted ring of virtual nodes.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

/// Hash function placed on the ring: bytes to a 32-bit position.
pub type HashFn = fn(&[u8]) -> u32;

/// Default ring hash: CRC-32 (Castagnoli).
pub fn default_hash(data: &[u8]) -> u32 {
    crc32c::crc32c(data)
}

// == Hash Ring ==
/// Consistent hash ring with `replicas` virtual nodes per real node.
///
/// `keys` is kept sorted ascending; `hash_map` resolves each virtual node
/// back to the real node name. Nodes can only be added; dropping a node
/// means building a new ring.
///
/// Not synchronized: wrap it in a lock if `add` can race with `get`.
pub struct HashRing {
    hash: HashFn,
    /// Virtual nodes per real node
    replicas: usize,
    /// Sorted virtual node positions
    keys: Vec<u32>,
    /// Virtual node position to real node name
    hash_map: HashMap<u32, String>,
}

impl HashRing {
    // == Constructor ==
    /// Creates an empty ring.
    ///
    /// # Arguments
    /// * `replicas` - Virtual nodes placed for every real node
    /// * `hash` - Ring hash; `None` selects [`default_hash`]
    pub fn new(replicas: usize, hash: Option<HashFn>) -> Self {
        Self {
            hash: hash.unwrap_or(default_hash),
            replicas,
            keys: Vec::new(),
            hash_map: HashMap::new(),
        }
    }

    // == Add ==
    /// Places `replicas` virtual nodes for each of `nodes` on the ring.
    ///
    /// Virtual node `i` of node `n` sits at `hash("{i}{n}")`.
    pub fn add<I, S>(&mut self, nodes: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for node in nodes {
            let node = node.as_ref();
            for i in 0..self.replicas {
                let hash = (self.hash)(format!("{i}{node}").as_bytes());
                self.keys.push(hash);
                self.hash_map.insert(hash, node.to_string());
            }
            debug!(node, replicas = self.replicas, "Added node to hash ring");
        }
        self.keys.sort_unstable();
    }

    // == Get ==
    /// Returns the node owning `key`: the first virtual node clockwise from
    /// `hash(key)`, wrapping past the top of the ring.
    ///
    /// Returns `None` when no nodes have been added.
    pub fn get(&self, key: &str) -> Option<&str> {
        if self.keys.is_empty() {
            return None;
        }

        let hash = (self.hash)(key.as_bytes());
        let idx = self.keys.partition_point(|&k| k < hash);
        let position = self.keys[idx % self.keys.len()];
        self.hash_map.get(&position).map(String::as_str)
    }

    /// Number of virtual nodes on the ring.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn replicas(&self) -> usize {
        self.replicas
    }
}

impl Default for HashRing {
    fn default() -> Self {
        Self::new(50, None)
    }
}

impl fmt::Debug for HashRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashRing")
            .field("replicas", &self.replicas)
            .field("virtual_nodes", &self.keys.len())
            .finish()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Reads the key as a decimal number, so ring positions are predictable.
    fn numeric_hash(data: &[u8]) -> u32 {
        std::str::from_utf8(data).unwrap().parse().unwrap()
    }

    #[test]
    fn test_ring_empty_has_no_owner() {
        let ring = HashRing::new(3, None);
        assert!(ring.is_empty());
        assert_eq!(ring.get("anything"), None);
    }

    #[test]
    fn test_ring_clockwise_lookup() {
        let mut ring = HashRing::new(3, Some(numeric_hash));

        // virtual nodes: 2/12/22, 4/14/24, 6/16/26
        ring.add(["6", "4", "2"]);
        assert_eq!(ring.len(), 9);

        let cases = [("2", "2"), ("11", "2"), ("23", "4"), ("27", "2")];
        for (key, owner) in cases {
            assert_eq!(ring.get(key), Some(owner), "asking for {key}");
        }

        // 8/18/28 now sit between and after the old nodes
        ring.add(["8"]);
        let cases = [("2", "2"), ("11", "2"), ("23", "4"), ("27", "8")];
        for (key, owner) in cases {
            assert_eq!(ring.get(key), Some(owner), "asking for {key}");
        }
    }

    #[test]
    fn test_ring_lookup_is_deterministic() {
        let mut ring = HashRing::default();
        ring.add(["peer-a", "peer-b", "peer-c"]);

        for i in 0..1000 {
            let key = format!("key-{i}");
            assert_eq!(ring.get(&key), ring.get(&key));
        }
    }

    #[test]
    fn test_ring_spreads_keys_across_nodes() {
        let nodes = ["peer-a", "peer-b", "peer-c", "peer-d"];
        let mut ring = HashRing::new(100, None);
        ring.add(nodes);

        let mut histogram: HashMap<&str, usize> = HashMap::new();
        let samples = 40_000;
        for i in 0..samples {
            let owner = ring.get(&format!("key-{i}")).unwrap();
            *histogram.entry(owner).or_default() += 1;
        }

        assert_eq!(histogram.len(), nodes.len());
        for (node, count) in histogram {
            // a perfect split is 10_000 per node
            assert!(count > 5_000 && count < 15_000, "{node} owns {count} keys");
        }
    }

    #[test]
    fn test_ring_growth_moves_few_keys() {
        let mut ring = HashRing::new(100, None);
        ring.add(["peer-a", "peer-b", "peer-c", "peer-d"]);

        let samples = 20_000;
        let before: Vec<String> = (0..samples)
            .map(|i| ring.get(&format!("key-{i}")).unwrap().to_string())
            .collect();

        ring.add(["peer-e"]);

        let mut moved = 0;
        for (i, old_owner) in before.iter().enumerate() {
            let new_owner = ring.get(&format!("key-{i}")).unwrap();
            if new_owner != old_owner.as_str() {
                // keys only ever move to the new node
                assert_eq!(new_owner, "peer-e");
                moved += 1;
            }
        }

        // expected share is 1/5 of the keys
        let ratio = moved as f64 / samples as f64;
        assert!(ratio > 0.1 && ratio < 0.3, "moved ratio {ratio}");
    }
}
