//! Keyed storage over a bounded integer key space
//!
//! Two backends share the [`KeyedStore`] contract:
//! - [`DirectStore`]: dense slot vector, one slot per addressable key
//! - [`HashStore`]: AHash map for sparse or very large key spaces
//!
//! Every operation checks `key < bound` first and fails with
//! [`Error::KeyOutOfRange`] without touching state.

use std::collections::HashMap;
use ahash::RandomState;

use crate::error::{Error, Result};

/// O(1) storage addressed by a bounded non-negative integer key
pub trait KeyedStore {
    /// Stored value type
    type Value: Clone;

    /// Exclusive upper bound of the key space
    fn bound(&self) -> u64;

    /// Check whether an entry exists for `key`
    fn contains(&self, key: u64) -> Result<bool>;

    /// Borrow the value stored for `key`
    fn get(&self, key: u64) -> Result<&Self::Value>;

    /// Insert or overwrite the value for `key`
    fn set(&mut self, key: u64, value: Self::Value) -> Result<()>;

    /// Delete the entry for `key`, returning the old value if present
    fn remove(&mut self, key: u64) -> Result<Option<Self::Value>>;

    /// Number of stored entries
    fn len(&self) -> usize;

    /// Check if the store is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry, keeping the key space
    fn clear(&mut self);

    /// Check `key` against the bound
    fn check(&self, key: u64) -> Result<()> {
        let bound = self.bound();
        if key < bound {
            Ok(())
        } else {
            Err(Error::KeyOutOfRange { key, bound })
        }
    }
}

/// Direct-addressed store: slot `k` holds the value for key `k`
pub struct DirectStore<V> {
    slots: Vec<Option<V>>,
    len: usize,
}

impl<V: Clone> DirectStore<V> {
    /// Allocate `bound` empty slots
    pub fn new(bound: u64) -> Result<Self> {
        if bound == 0 {
            return Err(Error::KeyBoundInvalid(bound));
        }
        let size = usize::try_from(bound).map_err(|_| Error::KeyBoundInvalid(bound))?;
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(size)
            .map_err(|_| Error::KeyBoundInvalid(bound))?;
        slots.resize(size, None);

        Ok(Self { slots, len: 0 })
    }
}

impl<V: Clone> KeyedStore for DirectStore<V> {
    type Value = V;

    fn bound(&self) -> u64 {
        self.slots.len() as u64
    }

    fn contains(&self, key: u64) -> Result<bool> {
        self.check(key)?;
        Ok(self.slots[key as usize].is_some())
    }

    fn get(&self, key: u64) -> Result<&V> {
        self.check(key)?;
        self.slots[key as usize].as_ref().ok_or(Error::NotFound(key))
    }

    fn set(&mut self, key: u64, value: V) -> Result<()> {
        self.check(key)?;
        let slot = &mut self.slots[key as usize];
        if slot.is_none() {
            self.len += 1;
        }
        *slot = Some(value);
        Ok(())
    }

    fn remove(&mut self, key: u64) -> Result<Option<V>> {
        self.check(key)?;
        let old = self.slots[key as usize].take();
        if old.is_some() {
            self.len -= 1;
        }
        Ok(old)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.len = 0;
    }
}

/// Hash-backed store with the same bound and contract as [`DirectStore`]
pub struct HashStore<V> {
    map: HashMap<u64, V, RandomState>,
    bound: u64,
}

impl<V: Clone> HashStore<V> {
    /// Create an empty store over `0..bound`
    pub fn new(bound: u64) -> Result<Self> {
        if bound == 0 {
            return Err(Error::KeyBoundInvalid(bound));
        }

        Ok(Self {
            map: HashMap::with_hasher(RandomState::new()),
            bound,
        })
    }

    /// Create an empty store with room for `capacity` entries
    pub fn with_capacity(bound: u64, capacity: usize) -> Result<Self> {
        let mut store = Self::new(bound)?;
        store
            .map
            .try_reserve(capacity)
            .map_err(|_| Error::CapacityInvalid(capacity))?;
        Ok(store)
    }
}

impl<V: Clone> KeyedStore for HashStore<V> {
    type Value = V;

    fn bound(&self) -> u64 {
        self.bound
    }

    fn contains(&self, key: u64) -> Result<bool> {
        self.check(key)?;
        Ok(self.map.contains_key(&key))
    }

    fn get(&self, key: u64) -> Result<&V> {
        self.check(key)?;
        self.map.get(&key).ok_or(Error::NotFound(key))
    }

    fn set(&mut self, key: u64, value: V) -> Result<()> {
        self.check(key)?;
        self.map.insert(key, value);
        Ok(())
    }

    fn remove(&mut self, key: u64) -> Result<Option<V>> {
        self.check(key)?;
        Ok(self.map.remove(&key))
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    fn clear(&mut self) {
        self.map.clear();
    }
}
