//! # collatzcache
//!
//! Fixed-capacity FIFO cache for memoized Collatz step counts.
//!
//! ## Architecture
//! - **KeyedStore**: direct-addressed slots (or an AHash map) over a bounded key space, O(1)
//! - **FIFO queue**: `VecDeque` of keys in insertion order, eviction pops the front
//! - **Stats**: hit/miss/insert/update/eviction counters
//! - **Memo**: range-gated step counting through a borrowed cache
//!
//! Updating a resident key never moves it in the eviction queue.
//!
//! ```
//! use collatzcache::{DirectStore, FifoCache, Memo, Source};
//!
//! let mut cache: FifoCache<DirectStore<u32>> = FifoCache::new(1000, 1_000_000)?;
//! let mut memo = Memo::new(&mut cache);
//!
//! assert_eq!(memo.steps(27)?.value, 111);
//! assert_eq!(memo.steps(27)?.source, Source::Hit);
//! # Ok::<(), collatzcache::Error>(())
//! ```

#![warn(missing_docs)]

mod collatz;
mod error;
mod fifo;
mod shared;
mod stats;
mod store;

pub use collatz::{steps, Memo, Source, Steps};
pub use error::{Error, Result};
pub use fifo::FifoCache;
pub use shared::SharedCache;
pub use stats::CacheStats;
pub use store::{DirectStore, HashStore, KeyedStore};
