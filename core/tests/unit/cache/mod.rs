//! Integration tests for the banked, set-associative LRU cache.

/// The single-set LRU eviction primitive.
pub mod lru_set;
/// The multi-bank cache built on top of it.
pub mod banked_cache;
