//! Cache hardware model.
//!
//! Holds the functional units of the simulated memory side. Only the cache
//! itself is modeled; there is no timing, write policy, or lower level.

/// Functional units (the cache and its replacement policies).
pub mod units;
