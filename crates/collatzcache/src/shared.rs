//! SharedCache: thread-safe handle over a single FifoCache
//!
//! The whole cache (store, eviction queue and counters) sits behind one
//! `RwLock`. Lookups take the read lock since the counters are atomic;
//! anything that changes residency takes the write lock.

use std::sync::Arc;
use parking_lot::RwLock;

use crate::error::Result;
use crate::fifo::FifoCache;
use crate::store::KeyedStore;

/// Cloneable, lock-guarded handle to a [`FifoCache`]
pub struct SharedCache<S: KeyedStore> {
    cache: Arc<RwLock<FifoCache<S>>>,
}

impl<S: KeyedStore> SharedCache<S> {
    /// Wrap an owned cache
    pub fn new(cache: FifoCache<S>) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    /// Look up a key, recording a hit or a miss
    pub fn get(&self, key: u64) -> Result<Option<S::Value>> {
        self.cache.read().get(key)
    }

    /// Insert or update a key, returning the evicted entry if any
    pub fn put(&self, key: u64, value: S::Value) -> Result<Option<(u64, S::Value)>> {
        self.cache.write().put(key, value)
    }

    /// Remove a key explicitly
    pub fn remove(&self, key: u64) -> Result<Option<S::Value>> {
        self.cache.write().remove(key)
    }

    /// Run `f` with exclusive access, for multi-step updates that must not
    /// interleave with other callers
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut FifoCache<S>) -> R) -> R {
        let mut cache = self.cache.write();
        f(&mut *cache)
    }

    /// Get current number of resident entries
    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }

    /// Hit rate as a percentage
    pub fn hit_rate(&self) -> f64 {
        self.cache.read().hit_rate()
    }

    /// Clear entries and statistics
    pub fn clear(&self) {
        self.cache.write().clear();
    }
}

impl<S: KeyedStore> Clone for SharedCache<S> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DirectStore;
    use std::thread;

    #[test]
    fn test_shared_basic() {
        let shared = SharedCache::new(FifoCache::new(2, 16).unwrap());

        shared.put(1, 10u32).unwrap();
        assert_eq!(shared.get(1).unwrap(), Some(10));
        assert_eq!(shared.get(2).unwrap(), None);
        assert_eq!(shared.hit_rate(), 50.0);

        assert_eq!(shared.remove(1).unwrap(), Some(10));
        assert!(shared.is_empty());
    }

    #[test]
    fn test_shared_concurrent_puts() {
        let capacity = 8;
        let shared: SharedCache<DirectStore<u64>> =
            SharedCache::new(FifoCache::new(capacity, 1024).unwrap());

        let handles: Vec<_> = (0..4u64)
            .map(|t| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for i in 0..100u64 {
                        let key = t * 100 + i;
                        shared.put(key, key).unwrap();
                        shared.get(key).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        shared.with_mut(|cache| {
            assert_eq!(cache.len(), capacity);
            assert_eq!(cache.stats().inserts(), 400);
            assert_eq!(cache.stats().evictions(), 400 - capacity as u64);
            assert_eq!(cache.stats().lookups(), 400);
            for key in cache.keys().collect::<Vec<_>>() {
                assert_eq!(cache.peek(key).unwrap(), Some(&key));
            }
        });
    }

    #[test]
    fn test_shared_clear() {
        let shared = SharedCache::new(FifoCache::new(4, 16).unwrap());
        let other = shared.clone();

        shared.put(3, "x").unwrap();
        other.clear();

        assert_eq!(shared.len(), 0);
        assert_eq!(shared.hit_rate(), 0.0);
    }
}
