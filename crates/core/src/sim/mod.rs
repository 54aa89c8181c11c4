//! Simulation drivers.
//!
//! Provides everything that feeds accesses into a cache:
//! 1. **Simulator:** Decodes addresses and accounts hits/misses for one cache.
//! 2. **Trace:** Lazily parses `<op> <hex-address> <bytes>` trace files.
//! 3. **Sweep:** Runs many configurations over one trace.

/// Access-driven simulator for one cache configuration.
pub mod simulator;

/// Configuration sweeps over a shared trace.
pub mod sweep;

/// Trace file reader.
pub mod trace;

pub use simulator::CacheSimulator;
pub use sweep::{SweepResult, legacy_grid, run_sweep};
pub use trace::{AccessKind, TraceReader, TraceRecord};
