//! LRU Cache Module
//!
//! Bounded least-recently-used map built from a hash index and a doubly
//! linked recency list threaded through an [`EntrySlab`].
//!
//! - Head = Most recently used
//! - Tail = Least recently used
//!
//! `get` and `put` are both O(1) expected: one hash lookup plus a constant
//! number of link updates. This type is not synchronized; see
//! [`CacheStore`](super::CacheStore) for the shared, thread-safe wrapper.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use crate::cache::entry::{Entry, EntrySlab, SlotId, PREALLOC_LIMIT};
use crate::error::{CacheError, Result};

// == LRU Cache ==
/// Fixed-capacity map that evicts the least recently used entry when full.
#[derive(Debug)]
pub struct LruCache<K, V> {
    /// Key -> slot of its entry
    index: HashMap<K, SlotId>,
    /// Owner of every entry and of the recency links
    entries: EntrySlab<K, V>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
    /// Maximum number of entries, fixed at construction
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// # Errors
    /// Returns [`CacheError::InvalidCapacity`] when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }

        Ok(Self {
            index: HashMap::with_capacity(capacity.min(PREALLOC_LIMIT)),
            entries: EntrySlab::with_capacity(capacity),
            head: None,
            tail: None,
            capacity,
        })
    }

    // == Put ==
    /// Inserts or updates `key`, making it the most recently used entry.
    ///
    /// Updating an existing key never evicts. Inserting a new key into a full
    /// cache first evicts the least recently used entry, which is returned.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(&id) = self.index.get(&key) {
            if let Some(entry) = self.entries.get_mut(id) {
                entry.value = value;
            }
            self.move_to_front(id);
            return None;
        }

        let evicted = if self.index.len() >= self.capacity {
            self.pop_lru()
        } else {
            None
        };

        let id = self.entries.insert(Entry::new(key.clone(), value));
        self.attach_front(id);
        self.index.insert(key, id);

        debug_assert_eq!(self.entries.len(), self.index.len());
        evicted
    }

    // == Get ==
    /// Returns the value for `key` and marks it most recently used.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = *self.index.get(key)?;
        self.move_to_front(id);
        self.entries.get(id).map(|entry| &entry.value)
    }

    // == Peek ==
    /// Returns the value for `key` without touching recency order.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = *self.index.get(key)?;
        self.entries.get(id).map(|entry| &entry.value)
    }

    // == Remove ==
    /// Removes `key` and returns its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.index.remove(key)?;
        self.detach(id);
        self.entries.remove(id).map(|entry| entry.value)
    }

    // == Pop LRU ==
    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let id = self.tail?;
        self.detach(id);
        let entry = self.entries.remove(id)?;
        self.index.remove(&entry.key);
        Some((entry.key, entry.value))
    }

    // == Contains ==
    /// Checks for `key` without touching recency order.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the fixed maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Keys By Recency ==
    /// Returns all keys from most to least recently used.
    pub fn keys_by_recency(&self) -> Vec<K> {
        let mut keys = Vec::with_capacity(self.index.len());
        let mut cursor = self.head;
        while let Some(id) = cursor {
            match self.entries.get(id) {
                Some(entry) => {
                    keys.push(entry.key.clone());
                    cursor = entry.next;
                }
                None => break,
            }
        }
        keys
    }

    // == List Maintenance ==
    fn move_to_front(&mut self, id: SlotId) {
        if self.head == Some(id) {
            return;
        }
        self.detach(id);
        self.attach_front(id);
    }

    /// Unlinks `id` from its neighbours, fixing head/tail as needed.
    fn detach(&mut self, id: SlotId) {
        let (prev, next) = match self.entries.get_mut(id) {
            Some(entry) => (entry.prev.take(), entry.next.take()),
            None => return,
        };

        match prev.and_then(|p| self.entries.get_mut(p)) {
            Some(prev_entry) => prev_entry.next = next,
            None => self.head = next,
        }

        match next.and_then(|n| self.entries.get_mut(n)) {
            Some(next_entry) => next_entry.prev = prev,
            None => self.tail = prev,
        }
    }

    /// Links an unlinked `id` in as the new head.
    fn attach_front(&mut self, id: SlotId) {
        let old_head = self.head;

        if let Some(entry) = self.entries.get_mut(id) {
            entry.prev = None;
            entry.next = old_head;
        }

        match old_head.and_then(|h| self.entries.get_mut(h)) {
            Some(head_entry) => head_entry.prev = Some(id),
            None => self.tail = Some(id),
        }

        self.head = Some(id);
    }

    // == Consistency Check ==
    /// Walks the list head to tail, checking back links, the tail pointer
    /// and the index. Panics on any disagreement.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self)
    where
        K: std::fmt::Debug,
    {
        assert!(self.index.len() <= self.capacity, "over capacity");
        assert_eq!(self.entries.len(), self.index.len(), "slab/index size");

        let mut seen = 0;
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let entry = self.entries.get(id).expect("linked slot is empty");
            assert_eq!(entry.prev, prev, "broken back link at {:?}", entry.key);
            assert_eq!(self.index.get(&entry.key), Some(&id), "index mismatch");
            seen += 1;
            prev = Some(id);
            cursor = entry.next;
        }
        assert_eq!(self.tail, prev, "tail is not the last node");
        assert_eq!(seen, self.index.len(), "list length != index length");
    }
}
