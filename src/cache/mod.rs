//! Cache Module
//!
//! Bounded in-memory caching with least-recently-used eviction.

mod entry;
mod lru;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use lru::LruCache;
pub use store::CacheStore;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB

/// Capacity used when none is configured
pub const DEFAULT_CAPACITY: usize = 100_000;
