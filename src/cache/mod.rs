//! Cache Module
//!
//! In-memory entity cache for the chat client: four keyed caches behind a
//! provider abstraction plus a per-channel name index.

mod manager;
mod order;
mod provider;
mod stats;
mod store;


use serde::Serialize;

// Re-export public types
pub use manager::{CacheManager, CacheManagerStats};
pub use order::InsertionOrder;
pub use provider::{CacheClient, CacheKey, CacheProvider, DefaultCacheProvider};
pub use stats::CacheStats;
pub use store::CacheStore;

// == Cache Size ==
/// Maximum entry count of a single cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "max")]
pub enum CacheSize {
    /// No bound, nothing is ever evicted
    Unbounded,
    /// At most this many entries; the oldest insertion is evicted first
    Bounded(usize),
}

impl CacheSize {
    /// Maps a signed size where any negative value means unbounded.
    pub fn from_signed(size: i64) -> Self {
        if size < 0 {
            CacheSize::Unbounded
        } else {
            CacheSize::Bounded(size as usize)
        }
    }

    /// Returns the bound, or None when unbounded.
    pub fn max(&self) -> Option<usize> {
        match self {
            CacheSize::Unbounded => None,
            CacheSize::Bounded(max) => Some(*max),
        }
    }
}
