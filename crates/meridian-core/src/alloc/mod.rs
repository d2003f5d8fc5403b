//! Collection types used across Meridian.
//!
//! This module provides:
//! - Re-exports of hash collections using AHash
//! - An insertion-ordered map seeded with the same hasher

// Re-export optimized hash collections
pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};

/// Insertion-ordered map hashed with AHash.
///
/// Used wherever iteration order must follow creation order, such as
/// component main-types within a render pass.
pub type IndexMap<K, V> = indexmap::IndexMap<K, V, RandomState>;

/// Create an empty [`IndexMap`].
pub fn index_map<K, V>() -> IndexMap<K, V> {
    IndexMap::with_hasher(RandomState::new())
}
