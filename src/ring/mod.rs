//! Ring Module
//!
//! Consistent hashing used to pick the peer that owns a key.

mod consistent_hash;

pub use consistent_hash::{default_hash, HashFn, HashRing};
