//! Error definitions for the cache simulator.
//!
//! This module defines every failure the library can report:
//! 1. **Configuration Errors:** Geometries that cannot describe a real cache.
//! 2. **Trace Errors:** I/O failures and malformed records in trace files.
//! 3. **Statistics Errors:** Ratios requested before any access was counted.
//! 4. **Top-level Errors:** [`SimError`] wraps all of the above for drivers.
//!
//! Address decoding has no error type: it is total over all 32-bit inputs.

use std::io;

use thiserror::Error;

/// A cache configuration that does not describe a consistent geometry.
///
/// Raised by [`CacheConfig::geometry`](crate::config::CacheConfig::geometry)
/// before any line storage is allocated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Cache size is zero or not a power of two.
    #[error("cache size {0} bytes is not a positive power of two")]
    SizeNotPowerOfTwo(u32),

    /// Line size is zero or not a power of two.
    #[error("line size {0} bytes is not a positive power of two")]
    LineNotPowerOfTwo(u32),

    /// Line size exceeds the total cache size.
    #[error("line size {line_bytes} bytes exceeds cache size {size_bytes} bytes")]
    LineLargerThanCache {
        /// Requested line size.
        line_bytes: u32,
        /// Requested cache size.
        size_bytes: u32,
    },

    /// An N-way associativity that does not split the cache into 2^k sets.
    #[error("{0} lines per set is not a power of two")]
    AssociativityNotPowerOfTwo(u32),
}

/// A failure while reading an access trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The underlying reader failed.
    #[error("trace I/O error: {0}")]
    Io(#[from] io::Error),

    /// A record did not have the `<op> <address> <bytes>` shape.
    #[error("line {line}: {reason}")]
    Malformed {
        /// 1-based line number in the trace.
        line: usize,
        /// What was wrong with the record.
        reason: String,
    },

    /// The operation field was neither a load nor a store.
    #[error("line {line}: unknown operation `{op}`")]
    UnknownOperation {
        /// 1-based line number in the trace.
        line: usize,
        /// The offending operation text.
        op: String,
    },

    /// The address field was not a 32-bit hexadecimal number.
    #[error("line {line}: `{text}` is not a 32-bit hex address")]
    BadAddress {
        /// 1-based line number in the trace.
        line: usize,
        /// The offending address text.
        text: String,
    },

    /// The byte-count field was not a decimal number.
    #[error("line {line}: `{text}` is not a byte count")]
    BadByteCount {
        /// 1-based line number in the trace.
        line: usize,
        /// The offending byte-count text.
        text: String,
    },
}

/// A statistic that is undefined for the counters observed so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StatsError {
    /// Ratio requested with `hits + misses == 0`.
    #[error("no accesses have been recorded")]
    NoAccesses,
}

/// Any error a simulation driver can encounter.
#[derive(Debug, Error)]
pub enum SimError {
    /// Invalid cache geometry.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Trace could not be read or parsed.
    #[error(transparent)]
    Trace(#[from] TraceError),

    /// A statistic was requested that is undefined.
    #[error(transparent)]
    Stats(#[from] StatsError),

    /// A JSON configuration document could not be decoded.
    #[error("configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading a configuration file or console input failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
