//! Configuration Sweeps.
//!
//! Replays one trace through many independent cache configurations. Each
//! configuration gets its own [`CacheSimulator`]; simulators share only the
//! read-only address list, so they are spread across scoped worker threads
//! and the results are returned in configuration order.
//!
//! [`legacy_grid`] reproduces the automated test matrix of the legacy
//! command-line tool.

use std::num::NonZeroUsize;
use std::thread;

use serde::Serialize;

use crate::common::error::{ConfigError, StatsError};
use crate::config::{CacheConfig, ReplacementPolicy};
use crate::sim::simulator::CacheSimulator;
use crate::stats::CacheStats;

/// Cache sizes of the legacy grid, as powers of two (512 B to 16 KiB).
pub const LEGACY_SIZE_EXPONENTS: std::ops::RangeInclusive<u32> = 9..=14;

/// Associativities of the legacy grid, in reporting order.
pub const LEGACY_LINES_PER_SET: [u32; 5] = [0, 1, 2, 4, 8];

/// Line sizes of the legacy grid.
pub const LEGACY_LINE_SIZES: [u32; 2] = [32, 64];

/// Result of one configuration in a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SweepResult {
    /// The configuration that was simulated.
    pub config: CacheConfig,
    /// Its final counters.
    pub stats: CacheStats,
}

impl SweepResult {
    /// Hit ratio of this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::NoAccesses`] if the trace was empty.
    pub fn hit_ratio(&self) -> Result<f64, StatsError> {
        self.stats.hit_ratio()
    }
}

/// Builds the legacy automated test grid.
///
/// For every cache size from 512 B to 16 KiB and every associativity in
/// `{0, 1, 2, 4, 8}`: direct-mapped caches run with 32- and 64-byte lines;
/// every other associativity runs 32-byte FIFO, 32-byte LRU, 64-byte FIFO,
/// and 64-byte LRU, in that order.
pub fn legacy_grid() -> Vec<CacheConfig> {
    let mut configs = Vec::new();
    for exp in LEGACY_SIZE_EXPONENTS {
        let size = 1u32 << exp;
        for lines_per_set in LEGACY_LINES_PER_SET {
            if lines_per_set == 1 {
                for line in LEGACY_LINE_SIZES {
                    configs.push(CacheConfig::new(size, line, 1, ReplacementPolicy::Fifo));
                }
                continue;
            }
            for line in LEGACY_LINE_SIZES {
                for policy in [ReplacementPolicy::Fifo, ReplacementPolicy::Lru] {
                    configs.push(CacheConfig::new(size, line, lines_per_set, policy));
                }
            }
        }
    }
    configs
}

/// Runs every configuration over `addresses`.
///
/// All configurations are validated before any simulation starts.
///
/// # Errors
///
/// Returns the [`ConfigError`] of the first invalid configuration.
pub fn run_sweep(
    configs: &[CacheConfig],
    addresses: &[u32],
) -> Result<Vec<SweepResult>, ConfigError> {
    let mut sims = configs
        .iter()
        .map(CacheSimulator::new)
        .collect::<Result<Vec<_>, _>>()?;
    if sims.is_empty() {
        return Ok(Vec::new());
    }

    let workers = thread::available_parallelism().map_or(1, NonZeroUsize::get);
    let chunk = sims.len().div_ceil(workers);
    tracing::debug!(
        configs = sims.len(),
        accesses = addresses.len(),
        workers,
        "starting sweep"
    );

    thread::scope(|scope| {
        for batch in sims.chunks_mut(chunk) {
            let _ = scope.spawn(move || {
                for sim in batch {
                    sim.process_trace(addresses.iter().copied());
                }
            });
        }
    });

    Ok(sims
        .iter()
        .map(|sim| SweepResult {
            config: *sim.config(),
            stats: *sim.stats(),
        })
        .collect())
}
