//! Cache Store Module
//!
//! Thread-safe string cache: a single exclusive lock around an [`LruCache`].
//!
//! `get` reorders the recency list, so reads need exclusive access just like
//! writes. Every public method takes the lock for its whole body and holds
//! it for O(1) work, never across I/O or an `.await`.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::cache::LruCache;
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Shared bounded LRU cache mapping strings to strings.
#[derive(Debug)]
pub struct CacheStore {
    /// Index and recency list, always modified together
    inner: Mutex<LruCache<String, String>>,
    /// Copy of the engine's capacity, readable without locking
    capacity: usize,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store holding at most `capacity` entries.
    ///
    /// # Errors
    /// Returns [`CacheError::InvalidCapacity`] when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self {
            inner: Mutex::new(LruCache::new(capacity)?),
            capacity,
        })
    }

    /// Acquires the cache lock.
    ///
    /// Engine operations do not panic between link updates, so a poisoned
    /// lock still guards a consistent list.
    fn lock(&self) -> MutexGuard<'_, LruCache<String, String>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // == Put ==
    /// Inserts or updates a key, making it the most recently used.
    ///
    /// When a new key arrives at a full cache the least recently used
    /// entry is dropped silently.
    pub fn put(&self, key: String, value: String) {
        let evicted = self.lock().put(key, value);

        if let Some((evicted_key, _)) = evicted {
            debug!(key = %evicted_key, "Evicted least recently used entry");
        }
    }

    // == Get ==
    /// Retrieves a value by key, refreshing its recency.
    ///
    /// Returns `None` when the key is absent.
    pub fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    // == Peek ==
    /// Retrieves a value without refreshing its recency.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.lock().peek(key).cloned()
    }

    // == Delete ==
    /// Removes an entry by key.
    ///
    /// # Arguments
    /// * `key` - The key to delete
    pub fn delete(&self, key: &str) -> Result<()> {
        match self.lock().remove(key) {
            Some(_) => Ok(()),
            None => Err(CacheError::NotFound(key.to_string())),
        }
    }

    /// Checks for a key without refreshing its recency.
    pub fn contains(&self, key: &str) -> bool {
        self.lock().contains(key)
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns the fixed maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns all keys from most to least recently used.
    pub fn keys_by_recency(&self) -> Vec<String> {
        self.lock().keys_by_recency()
    }
}
