//! Allocation and collection types for Lucent.
//!
//! This module provides:
//! - Re-exports of hash collections using AHash
//! - A generational [`Arena`](arena::Arena) used for widget storage

pub mod arena;

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};
pub use arena::{Arena, ArenaKey};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashmap_ahash() {
        let mut map = HashMap::new();
        map.insert("key", "value");
        assert_eq!(map.get("key"), Some(&"value"));
    }
}
