//! Sampling rounds: plain vs memoized step counts over random inputs

use std::io::Write;

use anyhow::{bail, ensure, Result};
use collatzcache::{steps, FifoCache, KeyedStore, Memo, Source};
use rand::Rng;
use tracing::debug;

/// Validated run parameters
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Number of random samples
    pub samples: usize,
    /// Smallest sampled input (inclusive)
    pub min: u64,
    /// Largest sampled input (inclusive)
    pub max: u64,
    /// Cache capacity in entries
    pub capacity: usize,
    /// Exclusive upper bound of cacheable inputs
    pub key_bound: u64,
    /// Use the hash-backed store
    pub sparse: bool,
    /// RNG seed for reproducible samples
    pub seed: Option<u64>,
}

impl RunConfig {
    /// Reject ranges and sizes the run cannot use
    pub fn validate(&self) -> Result<()> {
        if self.min == 0 {
            bail!("min must be at least 1");
        }
        if self.min > self.max {
            bail!("min ({}) must not exceed max ({})", self.min, self.max);
        }
        if self.capacity == 0 {
            bail!("capacity must be greater than 0");
        }
        if self.key_bound == 0 {
            bail!("key bound must be greater than 0");
        }
        Ok(())
    }
}

/// Totals for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Samples drawn
    pub samples: usize,
    /// Samples answered straight from the cache
    pub hits: usize,
    /// Samples computed and stored
    pub computed: usize,
    /// Samples outside the range gate
    pub bypassed: usize,
    /// Cache evictions over the run
    pub evictions: u64,
    /// Cache-level hit rate (percentage), including trajectory lookups
    pub hit_rate: f64,
}

/// Draw `config.samples` inputs and print both step counts for each
pub fn run<S, R, W>(
    cache: &mut FifoCache<S>,
    rng: &mut R,
    config: &RunConfig,
    out: &mut W,
) -> Result<Summary>
where
    S: KeyedStore<Value = u32>,
    R: Rng,
    W: Write,
{
    let mut summary = Summary {
        samples: config.samples,
        hits: 0,
        computed: 0,
        bypassed: 0,
        evictions: 0,
        hit_rate: 0.0,
    };

    let mut memo = Memo::new(cache);
    for round in 0..config.samples {
        let n = rng.gen_range(config.min..=config.max);

        let plain = steps(n)?;
        writeln!(out, "Without cache - Value: {} - Steps: {}", n, plain)?;

        let cached = memo.steps(n)?;
        writeln!(out, "With cache - Value: {} - Steps: {}", n, cached.value)?;

        ensure!(
            plain == cached.value,
            "cached step count {} for {} disagrees with {}",
            cached.value,
            n,
            plain
        );

        match cached.source {
            Source::Hit => summary.hits += 1,
            Source::Computed => summary.computed += 1,
            Source::Bypassed => summary.bypassed += 1,
        }
        debug!(round, n, source = ?cached.source, hit_rate = memo.cache().hit_rate(), "round complete");
    }

    summary.evictions = memo.cache().stats().evictions();
    summary.hit_rate = memo.cache().hit_rate();
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use collatzcache::{DirectStore, HashStore};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config(samples: usize, min: u64, max: u64) -> RunConfig {
        RunConfig {
            samples,
            min,
            max,
            capacity: 1000,
            key_bound: 1_000_000,
            sparse: false,
            seed: Some(7),
        }
    }

    #[test]
    fn test_validate() {
        assert!(config(10, 1, 100).validate().is_ok());
        assert!(config(10, 0, 100).validate().is_err());
        assert!(config(10, 50, 10).validate().is_err());

        let mut zero_capacity = config(10, 1, 100);
        zero_capacity.capacity = 0;
        assert!(zero_capacity.validate().is_err());

        let mut zero_bound = config(10, 1, 100);
        zero_bound.key_bound = 0;
        let err = zero_bound.validate().unwrap_err();
        assert_eq!(err.to_string(), "key bound must be greater than 0");
    }

    #[test]
    fn test_run_output_pairs() {
        let config = config(20, 1, 5000);
        let mut cache: FifoCache<DirectStore<u32>> =
            FifoCache::new(config.capacity, config.key_bound).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let mut out = Vec::new();

        let summary = run(&mut cache, &mut rng, &config, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 40);
        for pair in lines.chunks(2) {
            let plain = pair[0].strip_prefix("Without cache - ").unwrap();
            let cached = pair[1].strip_prefix("With cache - ").unwrap();
            assert_eq!(plain, cached);
        }
        assert_eq!(summary.samples, 20);
        assert_eq!(summary.hits + summary.computed + summary.bypassed, 20);
    }

    #[test]
    fn test_run_repeated_value_hits() {
        let config = config(5, 27, 27);
        let mut cache: FifoCache<DirectStore<u32>> =
            FifoCache::new(config.capacity, config.key_bound).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let summary = run(&mut cache, &mut rng, &config, &mut std::io::sink()).unwrap();

        assert_eq!(summary.computed, 1);
        assert_eq!(summary.hits, 4);
        assert_eq!(summary.bypassed, 0);
        assert_eq!(cache.stats().hits(), 4);
        assert_eq!(cache.stats().misses(), 111);
    }

    #[test]
    fn test_run_bypass_only() {
        let config = config(3, 1, 1);
        let mut cache: FifoCache<HashStore<u32>> =
            FifoCache::sparse(config.capacity, config.key_bound).unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        let summary = run(&mut cache, &mut rng, &config, &mut std::io::sink()).unwrap();

        assert_eq!(summary.bypassed, 3);
        assert_eq!(summary.hit_rate, 0.0);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_run_seeded_is_deterministic() {
        let config = config(10, 1, 100_000);
        let mut first = Vec::new();
        let mut second = Vec::new();

        for out in [&mut first, &mut second] {
            let mut cache: FifoCache<DirectStore<u32>> = FifoCache::new(50, 1_000).unwrap();
            let mut rng = StdRng::seed_from_u64(99);
            run(&mut cache, &mut rng, &config, out).unwrap();
        }

        assert_eq!(first, second);
    }
}
