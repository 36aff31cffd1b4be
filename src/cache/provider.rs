//! Cache Provider Module
//!
//! Storage abstraction the entity cache is built on. The manager only talks
//! to [`CacheClient`]; a [`CacheProvider`] decides which concrete store backs
//! each cache.

use std::borrow::Borrow;
use std::convert::Infallible;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use crate::cache::{CacheSize, CacheStats, CacheStore};

/// Bounds every cache key must satisfy.
pub trait CacheKey: Eq + Hash + Clone + Debug + Send + Sync + 'static {}

impl<T> CacheKey for T where T: Eq + Hash + Clone + Debug + Send + Sync + 'static {}

// == Cache Client ==
/// A single keyed cache.
///
/// Implementations must be safe to share across threads. Lookups that find
/// nothing return `None`; absence is never an error.
pub trait CacheClient<K, V>: Send + Sync
where
    K: CacheKey,
    V: Send + Sync + 'static,
{
    /// Inserts or overwrites `key`, evicting the oldest entry if the cache is full.
    fn add(&self, key: K, value: V);

    /// Removes `key`, returning the previous value.
    ///
    /// Like `HashMap`, accepts any borrowed form of the key.
    fn remove<Q>(&self, key: &Q) -> Option<Arc<V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq;

    fn get<Q>(&self, key: &Q) -> Option<Arc<V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq;

    /// Returns the value for `key`, or builds one with `factory` and stores it.
    ///
    /// The check and the insert are atomic: racing callers for the same key
    /// all receive the single stored value. A factory error is returned as-is
    /// and leaves the cache untouched.
    fn try_get_or_add<E, F>(&self, key: K, factory: F) -> Result<Arc<V>, E>
    where
        F: FnOnce(&K) -> Result<V, E>;

    /// Infallible form of [`CacheClient::try_get_or_add`].
    fn get_or_add<F>(&self, key: K, factory: F) -> Arc<V>
    where
        F: FnOnce(&K) -> V,
    {
        match self.try_get_or_add(key, |k| Ok::<V, Infallible>(factory(k))) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Point-in-time copy of every cached value, oldest insertion first.
    fn entities(&self) -> Vec<Arc<V>>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn stats(&self) -> CacheStats;
}

// == Cache Provider ==
/// Factory for the caches owned by a [`crate::cache::CacheManager`].
pub trait CacheProvider {
    type Client<K: CacheKey, V: Send + Sync + 'static>: CacheClient<K, V>;

    fn create<K: CacheKey, V: Send + Sync + 'static>(&self, size: CacheSize) -> Self::Client<K, V>;
}

/// Provider backed by the in-process [`CacheStore`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCacheProvider;

impl CacheProvider for DefaultCacheProvider {
    type Client<K: CacheKey, V: Send + Sync + 'static> = CacheStore<K, V>;

    fn create<K: CacheKey, V: Send + Sync + 'static>(&self, size: CacheSize) -> Self::Client<K, V> {
        CacheStore::new(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_provider_creates_sized_store() {
        let provider = DefaultCacheProvider;
        let store: CacheStore<u64, String> = provider.create(CacheSize::Bounded(2));

        store.add(1, "a".to_string());
        store.add(2, "b".to_string());
        store.add(3, "c".to_string());

        assert_eq!(store.len(), 2);
        assert_eq!(store.size(), CacheSize::Bounded(2));
    }

    #[test]
    fn test_get_or_add_default_method() {
        let store: CacheStore<String, u32> = DefaultCacheProvider.create(CacheSize::Unbounded);

        let first = store.get_or_add("k".to_string(), |_| 7);
        let second = store.get_or_add("k".to_string(), |_| 8);

        assert_eq!(*first, 7);
        assert!(Arc::ptr_eq(&first, &second));
    }
}
