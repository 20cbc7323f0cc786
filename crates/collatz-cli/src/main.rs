//! collatz - compare plain and FIFO-memoized Collatz step counts

mod runner;

use anyhow::{Context, Result};
use clap::Parser;
use collatzcache::{DirectStore, FifoCache, HashStore};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::runner::{run, RunConfig, Summary};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of random values to test
    testing_value: usize,

    /// Smallest sampled value (inclusive)
    min: u64,

    /// Largest sampled value (inclusive)
    max: u64,

    /// Cache capacity (number of entries)
    #[arg(short, long, default_value_t = 1000)]
    capacity: usize,

    /// Values at or above this bound bypass the cache
    #[arg(short, long, default_value_t = 1_000_000)]
    key_bound: u64,

    /// Use a hash-backed store instead of direct addressing
    #[arg(long)]
    sparse: bool,

    /// Seed for reproducible sampling
    #[arg(long)]
    seed: Option<u64>,
}

impl From<Args> for RunConfig {
    fn from(args: Args) -> Self {
        Self {
            samples: args.testing_value,
            min: args.min,
            max: args.max,
            capacity: args.capacity,
            key_bound: args.key_bound,
            sparse: args.sparse,
            seed: args.seed,
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing; stdout is reserved for the report
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = RunConfig::from(Args::parse());
    config.validate().context("invalid arguments")?;

    info!(
        samples = config.samples,
        min = config.min,
        max = config.max,
        capacity = config.capacity,
        key_bound = config.key_bound,
        sparse = config.sparse,
        "starting run"
    );

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let summary = if config.sparse {
        let mut cache: FifoCache<HashStore<u32>> =
            FifoCache::sparse(config.capacity, config.key_bound)?;
        run(&mut cache, &mut rng, &config, &mut out)?
    } else {
        let mut cache: FifoCache<DirectStore<u32>> =
            FifoCache::new(config.capacity, config.key_bound)?;
        run(&mut cache, &mut rng, &config, &mut out)?
    };
    drop(out);

    report(&summary);
    Ok(())
}

fn report(summary: &Summary) {
    println!();
    println!("Samples:    {}", summary.samples);
    println!(
        "Answered:   {} from cache, {} computed, {} bypassed",
        summary.hits, summary.computed, summary.bypassed
    );
    println!("Evictions:  {}", summary.evictions);
    println!("Hit rate:   {:.2}%", summary.hit_rate);
}
