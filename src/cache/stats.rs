//! Cache Statistics Module
//!
//! Per-cache counters reported by the entity cache and the inspector.

use serde::Serialize;

use crate::cache::CacheSize;

// == Cache Stats ==
/// Counters for one keyed cache.
///
/// `capacity` is the bound the cache was created with (`None` when
/// unbounded). Insertions count every `add` and every value built by a
/// get-or-add factory; `overwrites` is the subset that replaced an existing
/// key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub capacity: Option<usize>,
    pub hits: u64,
    pub misses: u64,
    pub insertions: u64,
    pub overwrites: u64,
    /// Entries dropped because the cache was full
    pub evictions: u64,
    pub total_entries: usize,
}

impl CacheStats {
    /// Zeroed counters for an unbounded cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Zeroed counters for a cache created with `size`.
    pub fn for_size(size: CacheSize) -> Self {
        Self {
            capacity: size.max(),
            ..Self::default()
        }
    }

    /// hits / (hits + misses), or 0.0 before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        match self.hits + self.misses {
            0 => 0.0,
            lookups => self.hits as f64 / lookups as f64,
        }
    }

    /// Share of the bound currently in use.
    ///
    /// `None` for unbounded caches. A zero bound reports as full.
    pub fn fill_ratio(&self) -> Option<f64> {
        self.capacity.map(|capacity| match capacity {
            0 => 1.0,
            capacity => self.total_entries as f64 / capacity as f64,
        })
    }

    pub fn is_full(&self) -> bool {
        self.capacity
            .is_some_and(|capacity| self.total_entries >= capacity)
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_insert(&mut self, overwrite: bool) {
        self.insertions += 1;
        if overwrite {
            self.overwrites += 1;
        }
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
