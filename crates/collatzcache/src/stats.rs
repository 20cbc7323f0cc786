//! Lookup and residency counters for the FIFO cache
//!
//! Counters are atomic so a lookup can record through `&self`, which lets
//! `SharedCache` serve reads under its read lock.

use std::sync::atomic::{AtomicU64, Ordering};

/// Hit/miss and residency counters for a [`FifoCache`](crate::FifoCache)
#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    inserts: AtomicU64,
    updates: AtomicU64,
    evictions: AtomicU64,
}

impl CacheStats {
    /// All counters start at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Lookup found a resident step count
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Lookup found nothing; the caller will compute
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a new key becoming resident
    pub fn record_insert(&self) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an in-place value update
    pub fn record_update(&self) {
        self.updates.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an eviction
    pub fn record_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    /// Lookups answered from the cache
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Lookups that fell through to computation
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Keys that became resident
    pub fn inserts(&self) -> u64 {
        self.inserts.load(Ordering::Relaxed)
    }

    /// In-place overwrites of resident keys
    pub fn updates(&self) -> u64 {
        self.updates.load(Ordering::Relaxed)
    }

    /// Keys pushed out from the front of the queue
    pub fn evictions(&self) -> u64 {
        self.evictions.load(Ordering::Relaxed)
    }

    /// Total lookups (hits + misses)
    pub fn lookups(&self) -> u64 {
        self.hits() + self.misses()
    }

    /// Fraction of lookups that hit, `0.0` before any lookup
    pub fn hit_ratio(&self) -> f64 {
        match self.lookups() {
            0 => 0.0,
            total => self.hits() as f64 / total as f64,
        }
    }

    /// Hit ratio as a percentage (0.0 to 100.0)
    pub fn hit_rate(&self) -> f64 {
        self.hit_ratio() * 100.0
    }

    /// Zero every counter
    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.inserts.store(0, Ordering::Relaxed);
        self.updates.store(0, Ordering::Relaxed);
        self.evictions.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_basic() {
        let stats = CacheStats::new();

        stats.record_hit();
        stats.record_hit();
        stats.record_miss();

        assert_eq!(stats.hits(), 2);
        assert_eq!(stats.misses(), 1);
        assert_eq!(stats.lookups(), 3);
        assert_eq!(stats.hit_ratio(), 2.0 / 3.0);
        assert_eq!(stats.hit_rate(), 2.0 / 3.0 * 100.0);
    }

    #[test]
    fn test_stats_empty_rate() {
        let stats = CacheStats::new();
        stats.record_insert();
        stats.record_eviction();

        assert_eq!(stats.hit_ratio(), 0.0);
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_stats_reset() {
        let stats = CacheStats::new();

        stats.record_hit();
        stats.record_miss();
        stats.record_insert();
        stats.record_update();
        stats.record_eviction();
        stats.reset();

        assert_eq!(stats.hits(), 0);
        assert_eq!(stats.misses(), 0);
        assert_eq!(stats.inserts(), 0);
        assert_eq!(stats.updates(), 0);
        assert_eq!(stats.evictions(), 0);
        assert_eq!(stats.hit_ratio(), 0.0);
    }
}
