//! Group Module
//!
//! Named cache namespaces, their getters and the registry that finds them.

mod cache_group;
mod getter;
mod registry;

pub use cache_group::Group;
pub use getter::Getter;
pub use registry::{GroupBuilder, GroupRegistry};
