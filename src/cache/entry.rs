//! Cache Entry Module
//!
//! Defines the recency-list node and the slot arena that owns every node.
//! Links between nodes are slot indices rather than pointers, so the list
//! stays in safe Rust and freed slots are reused instead of reallocated.

// == Slot Id ==
/// Index of an entry inside an [`EntrySlab`].
pub type SlotId = usize;

/// Upper bound on up-front allocation. Very large capacities grow lazily.
pub const PREALLOC_LIMIT: usize = 1024;

// == Cache Entry ==
/// A single key/value pair plus its position in the recency list.
#[derive(Debug, Clone)]
pub struct Entry<K, V> {
    /// The key, duplicated here so eviction can clean up the index
    pub key: K,
    /// The stored value
    pub value: V,
    /// Neighbour closer to the most recently used end
    pub prev: Option<SlotId>,
    /// Neighbour closer to the least recently used end
    pub next: Option<SlotId>,
}

impl<K, V> Entry<K, V> {
    // == Constructor ==
    /// Creates an unlinked entry.
    pub fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            prev: None,
            next: None,
        }
    }
}

// == Entry Slab ==
/// Arena of entries addressed by [`SlotId`].
///
/// Removed slots go on a free list and are handed out again by the next
/// insert, so a full cache never grows the arena past its capacity.
#[derive(Debug)]
pub struct EntrySlab<K, V> {
    slots: Vec<Option<Entry<K, V>>>,
    free: Vec<SlotId>,
}

impl<K, V> EntrySlab<K, V> {
    /// Creates an empty slab sized for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity.min(PREALLOC_LIMIT)),
            free: Vec::new(),
        }
    }

    /// Stores an entry and returns the slot it landed in.
    pub fn insert(&mut self, entry: Entry<K, V>) -> SlotId {
        match self.free.pop() {
            Some(id) => {
                self.slots[id] = Some(entry);
                id
            }
            None => {
                self.slots.push(Some(entry));
                self.slots.len() - 1
            }
        }
    }

    /// Takes the entry out of `id`, freeing the slot.
    pub fn remove(&mut self, id: SlotId) -> Option<Entry<K, V>> {
        let entry = self.slots.get_mut(id)?.take()?;
        self.free.push(id);
        Some(entry)
    }

    pub fn get(&self, id: SlotId) -> Option<&Entry<K, V>> {
        self.slots.get(id)?.as_ref()
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut Entry<K, V>> {
        self.slots.get_mut(id)?.as_mut()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Number of slots ever allocated, occupied or free.
    #[cfg(test)]
    pub fn allocated(&self) -> usize {
        self.slots.len()
    }
}
