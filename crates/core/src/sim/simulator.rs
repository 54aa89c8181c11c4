//! Simulator: owns one cache, its decoder, and its counters.
//!
//! Every access is numbered from 1 in arrival order; LRU uses that number
//! as its recency stamp, so accesses must be applied strictly in trace
//! order. Nothing here is shared between simulators, which lets a sweep run
//! independent instances on separate threads.

use crate::common::addr::Access;
use crate::common::error::{ConfigError, TraceError};
use crate::config::{CacheConfig, CacheGeometry};
use crate::core::units::cache::CacheState;
use crate::core::units::cache::decoder::AddressDecoder;
use crate::sim::trace::TraceRecord;
use crate::stats::CacheStats;

/// Top-level simulator for one cache configuration.
#[derive(Debug, Clone)]
pub struct CacheSimulator {
    config: CacheConfig,
    decoder: AddressDecoder,
    state: CacheState,
    stats: CacheStats,
    /// Number of the most recent access; 0 before the first.
    sequence: u64,
}

impl CacheSimulator {
    /// Builds an empty cache for `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the geometry is inconsistent.
    pub fn new(config: &CacheConfig) -> Result<Self, ConfigError> {
        let state = CacheState::new(config)?;
        Ok(Self {
            config: *config,
            decoder: AddressDecoder::new(state.geometry()),
            state,
            stats: CacheStats::default(),
            sequence: 0,
        })
    }

    /// Classifies one access and updates the counters.
    pub fn process(&mut self, address: u32) -> Access {
        self.sequence += 1;
        let fields = self.decoder.decode(address);
        let access =
            self.state
                .lookup_or_insert(fields.set_index(), fields.tag, address, self.sequence);
        self.stats.record(access);
        access
    }

    /// Applies [`process`](Self::process) to every address, in order.
    pub fn process_trace<I>(&mut self, addresses: I)
    where
        I: IntoIterator<Item = u32>,
    {
        for address in addresses {
            let _ = self.process(address);
        }
    }

    /// Classifies the access described by a trace record.
    ///
    /// Only the address takes part in classification; loads and stores of
    /// any size are treated alike.
    pub fn process_record(&mut self, record: &TraceRecord) -> Access {
        self.process(record.address)
    }

    /// Streams parsed trace records into the cache, stopping at the first
    /// record that failed to parse.
    ///
    /// # Errors
    ///
    /// Returns the first [`TraceError`] yielded by `records`. Accesses before
    /// it have already been counted.
    pub fn process_records<I>(&mut self, records: I) -> Result<(), TraceError>
    where
        I: IntoIterator<Item = Result<TraceRecord, TraceError>>,
    {
        for record in records {
            let _ = self.process_record(&record?);
        }
        Ok(())
    }

    /// Counters accumulated so far.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// The simulated cache.
    pub const fn state(&self) -> &CacheState {
        &self.state
    }

    /// Configuration the simulator was built from.
    pub const fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Derived geometry (after the associativity clamp).
    pub const fn geometry(&self) -> &CacheGeometry {
        self.state.geometry()
    }

    /// Number of accesses processed.
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }
}
