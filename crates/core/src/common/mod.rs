//! Common types shared by every part of the simulator.
//!
//! This module provides:
//! 1. **Address Fields:** The decoded tag/set/offset view of a 32-bit address.
//! 2. **Access Classification:** The hit/miss outcome of one access.
//! 3. **Error Handling:** Configuration, trace, and statistics error types.

/// Decoded address fields and access outcome.
pub mod addr;

/// Error types for configuration, trace parsing, and statistics.
pub mod error;

pub use addr::{Access, DecodedAddress};
pub use error::{ConfigError, SimError, StatsError, TraceError};
