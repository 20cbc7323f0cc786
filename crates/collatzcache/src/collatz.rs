//! Collatz step counting, plain and memoized through a [`FifoCache`]

use tracing::debug;

use crate::error::{Error, Result};
use crate::fifo::FifoCache;
use crate::store::KeyedStore;

/// Number of Collatz steps needed to bring `n` down to 1
///
/// `steps(1) == 0`. Fails with `InvalidInput` for 0 and with `Overflow` if
/// `3n + 1` leaves the `u64` range.
pub fn steps(n: u64) -> Result<u32> {
    if n == 0 {
        return Err(Error::InvalidInput(n));
    }

    let mut current = n;
    let mut count = 0;
    while current != 1 {
        current = next(current)?;
        count += 1;
    }
    Ok(count)
}

fn next(n: u64) -> Result<u64> {
    if n % 2 == 0 {
        Ok(n / 2)
    } else {
        n.checked_mul(3)
            .and_then(|m| m.checked_add(1))
            .ok_or(Error::Overflow(n))
    }
}

/// Where a memoized step count came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Found in the cache
    Hit,
    /// Computed and stored
    Computed,
    /// Outside the range gate, computed without the cache
    Bypassed,
}

/// Memoized step count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Steps {
    /// Steps to reach 1
    pub value: u32,
    /// How the value was obtained
    pub source: Source,
}

/// Step counter that memoizes through a borrowed cache
///
/// Inputs `<= 1` or outside the cache's key bound skip the cache entirely:
/// no lookup, no insert, no hit/miss accounting.
pub struct Memo<'a, S: KeyedStore<Value = u32>> {
    cache: &'a mut FifoCache<S>,
}

impl<'a, S: KeyedStore<Value = u32>> Memo<'a, S> {
    /// Borrow `cache` for memoization
    pub fn new(cache: &'a mut FifoCache<S>) -> Self {
        Self { cache }
    }

    /// Range gate: whether `n` goes through the cache
    pub fn admits(&self, n: u64) -> bool {
        n > 1 && self.cache.accepts(n)
    }

    /// Step count for `n`
    ///
    /// Walks the trajectory until it reaches a cached value or leaves the
    /// range gate, then stores every uncached in-range value on the way back.
    pub fn steps(&mut self, n: u64) -> Result<Steps> {
        if !self.admits(n) {
            debug!(n, "bypassing cache");
            return Ok(Steps {
                value: steps(n)?,
                source: Source::Bypassed,
            });
        }

        let mut path = Vec::new();
        let mut current = n;
        let base = loop {
            if !self.admits(current) {
                break steps(current)?;
            }
            if let Some(value) = self.cache.get(current)? {
                if current == n {
                    return Ok(Steps {
                        value,
                        source: Source::Hit,
                    });
                }
                break value;
            }
            path.push(current);
            current = next(current)?;
        };

        let mut value = base;
        for &key in path.iter().rev() {
            value += 1;
            self.cache.put(key, value)?;
        }

        Ok(Steps {
            value,
            source: Source::Computed,
        })
    }

    /// Borrow the underlying cache
    pub fn cache(&self) -> &FifoCache<S> {
        &*self.cache
    }
}
