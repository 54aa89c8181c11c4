//! Trace-driven cache simulator library.
//!
//! This crate models a single level of cache answering a stream of 32-bit
//! memory accesses. It is organized as:
//! 1. **Common:** Address field types and the error taxonomy.
//! 2. **Config:** Cache geometry, replacement policy selection, and validation.
//! 3. **Core:** The cache unit itself (address decoder, line storage, replacement policies).
//! 4. **Simulation:** The access-driven simulator, trace reader, and configuration sweeps.
//! 5. **Stats:** Hit/miss accounting and ratio computation.
//!
//! The engine never performs I/O or formatting; trace files are read by
//! [`sim::trace`] and results are printed by the `cachesim` binary.

/// Common types (decoded addresses, access classification, errors).
pub mod common;
/// Cache configuration (defaults, policy enum, derived geometry).
pub mod config;
/// Cache hardware model (decoder, line storage, replacement policies).
pub mod core;
/// Simulator, trace reader, and sweep driver.
pub mod sim;
/// Hit/miss statistics.
pub mod stats;

/// Root configuration type for a single cache; validate with [`CacheConfig::geometry`].
pub use crate::config::CacheConfig;
/// Line storage and lookup; owned by a [`CacheSimulator`].
pub use crate::core::units::cache::CacheState;
/// Top-level simulator; construct with `CacheSimulator::new`.
pub use crate::sim::CacheSimulator;
/// Hit/miss counters.
pub use crate::stats::CacheStats;
