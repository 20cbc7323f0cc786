//! FIFO (First In, First Out) cache implementation
//!
//! Keys are evicted strictly in insertion order. Overwriting a resident key
//! updates its value in place and keeps its queue position, so unlike LRU
//! neither reads nor updates refresh a key.

use std::collections::VecDeque;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::stats::CacheStats;
use crate::store::{DirectStore, HashStore, KeyedStore};

/// Fixed-capacity FIFO cache over a [`KeyedStore`]
pub struct FifoCache<S: KeyedStore> {
    /// Resident entries
    store: S,

    /// Resident keys, oldest insertion at the front
    order: VecDeque<u64>,

    /// Maximum number of resident entries
    capacity: usize,

    /// Hit/miss accounting
    stats: CacheStats,
}

impl<V: Clone> FifoCache<DirectStore<V>> {
    /// Create a direct-addressed FIFO cache
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of resident entries
    /// * `key_bound` - Exclusive upper bound of cacheable keys
    ///
    /// # Returns
    /// * `Result<FifoCache>` - Empty cache, or `CapacityInvalid`/`KeyBoundInvalid`
    pub fn new(capacity: usize, key_bound: u64) -> Result<Self> {
        validate_capacity(capacity)?;
        Self::with_store(capacity, DirectStore::new(key_bound)?)
    }
}

impl<V: Clone> FifoCache<HashStore<V>> {
    /// Create a hash-backed FIFO cache for sparse key spaces
    pub fn sparse(capacity: usize, key_bound: u64) -> Result<Self> {
        validate_capacity(capacity)?;
        let reserve = initial_reserve(capacity, key_bound);
        Self::with_store(capacity, HashStore::with_capacity(key_bound, reserve)?)
    }
}

impl<S: KeyedStore> FifoCache<S> {
    /// Create a FIFO cache on top of an existing store
    ///
    /// The store is cleared so that every resident key is tracked in the
    /// eviction queue.
    pub fn with_store(capacity: usize, mut store: S) -> Result<Self> {
        validate_capacity(capacity)?;
        store.clear();
        let mut order = VecDeque::new();
        order
            .try_reserve(initial_reserve(capacity, store.bound()))
            .map_err(|_| Error::CapacityInvalid(capacity))?;

        Ok(Self {
            store,
            order,
            capacity,
            stats: CacheStats::new(),
        })
    }

    /// Look up a key, recording a hit or a miss
    ///
    /// Never changes residency. On a miss the caller computes the value and
    /// stores it with [`put`](Self::put).
    ///
    /// # Returns
    /// * `Ok(Some(value))` - Hit
    /// * `Ok(None)` - Miss
    /// * `Err(KeyOutOfRange)` - Key outside the cache bound, nothing recorded
    pub fn get(&self, key: u64) -> Result<Option<S::Value>> {
        match self.store.get(key) {
            Ok(value) => {
                self.stats.record_hit();
                trace!(key, "cache hit");
                Ok(Some(value.clone()))
            }
            Err(Error::NotFound(_)) => {
                self.stats.record_miss();
                trace!(key, "cache miss");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Look up a key without touching the statistics
    pub fn peek(&self, key: u64) -> Result<Option<&S::Value>> {
        match self.store.get(key) {
            Ok(value) => Ok(Some(value)),
            Err(Error::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Check residency without touching the statistics
    pub fn contains(&self, key: u64) -> Result<bool> {
        self.store.contains(key)
    }

    /// Insert or update a key
    ///
    /// An update overwrites the value in place and keeps the key's position
    /// in the eviction queue. A new key goes to the back of the queue; if the
    /// cache is then over capacity the front key is evicted.
    ///
    /// # Returns
    /// * `Result<Option<(u64, V)>>` - The evicted entry, if any
    pub fn put(&mut self, key: u64, value: S::Value) -> Result<Option<(u64, S::Value)>> {
        if self.store.contains(key)? {
            self.store.set(key, value)?;
            self.stats.record_update();
            return Ok(None);
        }

        self.store.set(key, value)?;
        self.order.push_back(key);
        self.stats.record_insert();

        if self.order.len() > self.capacity {
            self.evict()
        } else {
            Ok(None)
        }
    }

    /// Remove a key explicitly
    ///
    /// Not counted as an eviction. Linear in the number of resident keys.
    pub fn remove(&mut self, key: u64) -> Result<Option<S::Value>> {
        let removed = self.store.remove(key)?;
        if removed.is_some() {
            if let Some(pos) = self.order.iter().position(|&k| k == key) {
                self.order.remove(pos);
            }
        }
        Ok(removed)
    }

    /// Check whether `key` falls inside the cacheable range
    pub fn accepts(&self, key: u64) -> bool {
        key < self.store.bound()
    }

    /// Resident keys, oldest insertion first
    pub fn keys(&self) -> impl Iterator<Item = u64> + '_ {
        self.order.iter().copied()
    }

    /// Hit rate as a percentage, `0.0` before the first lookup
    pub fn hit_rate(&self) -> f64 {
        self.stats.hit_rate()
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Get the number of resident entries
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Exclusive upper bound of cacheable keys
    pub fn key_bound(&self) -> u64 {
        self.store.bound()
    }

    /// Drop every entry and reset statistics
    pub fn clear(&mut self) {
        self.store.clear();
        self.order.clear();
        self.stats.reset();
    }

    fn evict(&mut self) -> Result<Option<(u64, S::Value)>> {
        let Some(key) = self.order.pop_front() else {
            return Ok(None);
        };
        let value = self.store.remove(key)?;
        debug_assert!(value.is_some(), "queued key {} missing from store", key);

        let Some(value) = value else {
            return Ok(None);
        };
        self.stats.record_eviction();
        debug!(key, resident = self.order.len(), "evicted oldest entry");
        Ok(Some((key, value)))
    }
}

/// Upper limit on up-front reservation; larger caches grow on demand
const MAX_PREALLOC: usize = 1 << 16;

/// Residency never exceeds the key space, so don't reserve past it
fn initial_reserve(capacity: usize, key_bound: u64) -> usize {
    let bound = usize::try_from(key_bound).unwrap_or(usize::MAX);
    capacity.min(bound).min(MAX_PREALLOC) + 1
}

fn validate_capacity(capacity: usize) -> Result<()> {
    if capacity == 0 {
        Err(Error::CapacityInvalid(capacity))
    } else {
        Ok(())
    }
}
