//! Cache statistics collection.
//!
//! Tracks the hit and miss counts of one simulated cache and derives the
//! hit and miss ratios. Ratios over zero accesses are reported as
//! [`StatsError::NoAccesses`] instead of NaN so reporters must decide how
//! to render an empty trace.

use serde::Serialize;

use crate::common::addr::Access;
use crate::common::error::StatsError;

/// Hit/miss counters for one cache.
///
/// Counters only grow; a fresh set of counters comes with a fresh simulator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Accesses that found their line resident.
    pub hits: u64,
    /// Accesses that had to fill a line.
    pub misses: u64,
}

impl CacheStats {
    /// Counts one classified access.
    #[inline(always)]
    pub const fn record(&mut self, access: Access) {
        match access {
            Access::Hit => self.hits += 1,
            Access::Miss => self.misses += 1,
        }
    }

    /// `hits + misses`.
    pub const fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// `hits / (hits + misses)`.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::NoAccesses`] when no access has been recorded.
    pub fn hit_ratio(&self) -> Result<f64, StatsError> {
        self.ratio(self.hits)
    }

    /// `misses / (hits + misses)`.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::NoAccesses`] when no access has been recorded.
    pub fn miss_ratio(&self) -> Result<f64, StatsError> {
        self.ratio(self.misses)
    }

    fn ratio(&self, part: u64) -> Result<f64, StatsError> {
        match self.accesses() {
            0 => Err(StatsError::NoAccesses),
            total => Ok(part as f64 / total as f64),
        }
    }
}
