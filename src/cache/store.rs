//! Cache Store Module
//!
//! Default cache engine: HashMap storage with insertion-order eviction,
//! guarded by a single mutex so compound operations are atomic.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::cache::{CacheClient, CacheKey, CacheSize, CacheStats, InsertionOrder};

struct Inner<K, V> {
    /// Key-value storage
    entries: HashMap<K, Arc<V>>,
    /// Insertion order for eviction
    order: InsertionOrder<K>,
    /// Performance statistics
    stats: CacheStats,
}

// == Cache Store ==
/// Thread-safe keyed cache with an optional entry bound.
///
/// Every operation, including `try_get_or_add`, runs under one lock. The
/// factory passed to `try_get_or_add` therefore runs at most once per missing
/// key, and must not call back into the same store.
///
/// Insert, remove and eviction are O(log n) in the number of entries;
/// `entities` is O(n).
pub struct CacheStore<K, V> {
    inner: Mutex<Inner<K, V>>,
    size: CacheSize,
}

impl<K: CacheKey, V> CacheStore<K, V> {
    // == Constructor ==
    /// Creates an empty store with the given bound.
    pub fn new(size: CacheSize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                order: InsertionOrder::new(),
                stats: CacheStats::for_size(size),
            }),
            size,
        }
    }

    pub fn size(&self) -> CacheSize {
        self.size
    }

    /// Returns true if `key` is cached, without touching statistics.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().entries.contains_key(key)
    }

    // == Insert ==
    /// Stores `value` under `key` with the lock held.
    ///
    /// If the key already exists the value is overwritten and the key becomes
    /// the newest insertion. Otherwise the oldest entries are evicted until
    /// there is room.
    fn insert_locked(&self, inner: &mut Inner<K, V>, key: K, value: Arc<V>) {
        let is_overwrite = inner.entries.contains_key(&key);

        if let Some(max) = self.size.max() {
            if max == 0 {
                debug!(?key, "Cache bound is zero, not storing entry");
                return;
            }

            while !is_overwrite && inner.entries.len() >= max {
                match inner.order.evict_oldest() {
                    Some(evicted) => {
                        inner.entries.remove(&evicted);
                        inner.stats.record_eviction();
                        debug!(key = ?evicted, "Evicted oldest cache entry");
                    }
                    None => break,
                }
            }
        }

        inner.order.push(&key);
        inner.entries.insert(key, value);
        inner.stats.record_insert(is_overwrite);
        let len = inner.entries.len();
        inner.stats.set_total_entries(len);
    }
}

impl<K, V> CacheClient<K, V> for CacheStore<K, V>
where
    K: CacheKey,
    V: Send + Sync + 'static,
{
    fn add(&self, key: K, value: V) {
        let mut inner = self.inner.lock();
        self.insert_locked(&mut inner, key, Arc::new(value));
    }

    fn remove<Q>(&self, key: &Q) -> Option<Arc<V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let mut inner = self.inner.lock();
        let removed = inner.entries.remove(key)?;
        inner.order.remove(key);
        let len = inner.entries.len();
        inner.stats.set_total_entries(len);
        Some(removed)
    }

    fn get<Q>(&self, key: &Q) -> Option<Arc<V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let mut inner = self.inner.lock();
        match inner.entries.get(key).cloned() {
            Some(value) => {
                inner.stats.record_hit();
                Some(value)
            }
            None => {
                inner.stats.record_miss();
                None
            }
        }
    }

    fn try_get_or_add<E, F>(&self, key: K, factory: F) -> Result<Arc<V>, E>
    where
        F: FnOnce(&K) -> Result<V, E>,
    {
        let mut inner = self.inner.lock();
        if let Some(existing) = inner.entries.get(&key).cloned() {
            inner.stats.record_hit();
            return Ok(existing);
        }

        inner.stats.record_miss();
        let value = Arc::new(factory(&key)?);
        self.insert_locked(&mut inner, key, Arc::clone(&value));
        Ok(value)
    }

    fn entities(&self) -> Vec<Arc<V>> {
        let inner = self.inner.lock();
        inner
            .order
            .iter()
            .filter_map(|key| inner.entries.get(key).cloned())
            .collect()
    }

    fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    fn stats(&self) -> CacheStats {
        let inner = self.inner.lock();
        let mut stats = inner.stats.clone();
        stats.set_total_entries(inner.entries.len());
        stats
    }
}

impl<K, V> std::fmt::Debug for CacheStore<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheStore")
            .field("size", &self.size)
            .field("len", &self.inner.lock().entries.len())
            .finish()
    }
}
