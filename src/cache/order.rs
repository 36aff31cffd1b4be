//! Insertion Order Module
//!
//! Tracks the order keys were inserted in, for bounded-cache eviction.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

// == Insertion Order ==
/// Tracks insertion order for oldest-first eviction.
///
/// Every insertion is stamped with a monotonically increasing sequence
/// number. `slots` maps a key to its current stamp and `sequence` maps stamps
/// back to keys, so the smallest stamp is always the oldest insertion.
/// Push, remove and eviction are O(log n).
///
/// Reads never reorder keys; only a fresh insertion moves a key to the newest
/// position.
#[derive(Debug, Clone)]
pub struct InsertionOrder<K> {
    slots: HashMap<K, u64>,
    sequence: BTreeMap<u64, K>,
    next: u64,
}

impl<K> Default for InsertionOrder<K> {
    fn default() -> Self {
        Self {
            slots: HashMap::new(),
            sequence: BTreeMap::new(),
            next: 0,
        }
    }
}

impl<K: Eq + Hash + Clone> InsertionOrder<K> {
    // == Constructor ==
    /// Creates a new empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    // == Push ==
    /// Records `key` as the newest insertion.
    ///
    /// If the key is already tracked it is restamped as newest.
    pub fn push(&mut self, key: &K) {
        let stamp = self.next;
        self.next += 1;

        if let Some(previous) = self.slots.insert(key.clone(), stamp) {
            self.sequence.remove(&previous);
        }
        self.sequence.insert(stamp, key.clone());
    }

    // == Remove ==
    /// Removes a key from the tracker. Unknown keys are ignored.
    pub fn remove<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        if let Some(stamp) = self.slots.remove(key) {
            self.sequence.remove(&stamp);
        }
    }

    // == Evict Oldest ==
    /// Returns and removes the oldest inserted key.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<K> {
        let (_, key) = self.sequence.pop_first()?;
        self.slots.remove(&key);
        Some(key)
    }

    // == Peek Oldest ==
    /// Returns the oldest inserted key without removing it.
    pub fn peek_oldest(&self) -> Option<&K> {
        self.sequence.values().next()
    }

    /// Iterates keys from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.sequence.values()
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.slots.contains_key(key)
    }
}
