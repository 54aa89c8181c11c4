//! Cache Replacement Policies.
//!
//! Implements hit detection and victim selection for the lines of one set.
//!
//! # Policies
//!
//! - `DirectMapped`: one line per set, unconditional overwrite on a miss.
//! - `Fifo`: First-In, First-Out by miss arrival order.
//! - `Lru`: Least Recently Used by global access sequence.
//!
//! The set of policies is closed, so [`ReplacementPolicy`] is an enum
//! dispatched with `match` rather than a trait object.
//!
//! # Ordering
//!
//! Each [`CacheLine`] carries an `order` stamp. Invalid lines hold 0 and
//! every stamp a policy issues is at least 1, so empty slots are filled
//! first, lowest slot first. The victim is always the line with the
//! smallest stamp; ties go to the lowest slot.

/// Direct-mapped (single line per set) policy.
pub mod direct;

/// First-In, First-Out replacement policy.
pub mod fifo;

/// Least Recently Used replacement policy.
pub mod lru;

pub use direct::DirectMappedPolicy;
pub use fifo::FifoPolicy;
pub use lru::LruPolicy;

use super::CacheLine;
use crate::common::addr::Access;
use crate::config::{Associativity, CacheGeometry, ReplacementPolicy as PolicyType};

/// Outcome of one policy lookup within a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    /// Hit or miss.
    pub access: Access,
    /// Way (index within the set) that hit or was filled.
    pub way: usize,
    /// Tag of the valid line displaced by a miss, if any.
    pub evicted: Option<u32>,
}

impl Decision {
    /// A hit on `way`.
    const fn hit(way: usize) -> Self {
        Self {
            access: Access::Hit,
            way,
            evicted: None,
        }
    }

    /// A miss filled into `way`, displacing `victim`.
    const fn miss(way: usize, victim: &CacheLine) -> Self {
        Self {
            access: Access::Miss,
            way,
            evicted: if victim.is_valid() {
                Some(victim.tag())
            } else {
                None
            },
        }
    }
}

/// Replacement policy state for a whole cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplacementPolicy {
    /// One line per set.
    DirectMapped(DirectMappedPolicy),
    /// Oldest fill is evicted.
    Fifo(FifoPolicy),
    /// Least recently touched line is evicted.
    Lru(LruPolicy),
}

impl ReplacementPolicy {
    /// Selects the policy for a validated geometry.
    ///
    /// Direct-mapped geometries always get [`DirectMappedPolicy`]; the
    /// configured policy only applies when a set holds more than one line.
    pub const fn new(geometry: &CacheGeometry, policy: PolicyType) -> Self {
        match (geometry.associativity, policy) {
            (Associativity::DirectMapped, _) => Self::DirectMapped(DirectMappedPolicy),
            (_, PolicyType::Fifo) => Self::Fifo(FifoPolicy::new()),
            (_, PolicyType::Lru) => Self::Lru(LruPolicy),
        }
    }

    /// Looks up `tag` in `lines` (one set) and installs it on a miss.
    ///
    /// # Arguments
    ///
    /// * `lines` - The lines of the target set. Must not be empty.
    /// * `tag` - Tag of the incoming address.
    /// * `address` - Full incoming address, stored for diagnostics.
    /// * `sequence` - Global access number, starting at 1.
    pub fn access(
        &mut self,
        lines: &mut [CacheLine],
        tag: u32,
        address: u32,
        sequence: u64,
    ) -> Decision {
        match self {
            Self::DirectMapped(p) => p.access(lines, tag, address),
            Self::Fifo(p) => p.access(lines, tag, address),
            Self::Lru(p) => p.access(lines, tag, address, sequence),
        }
    }

    /// Short name of the active policy.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::DirectMapped(_) => "direct-mapped",
            Self::Fifo(_) => "FIFO",
            Self::Lru(_) => "LRU",
        }
    }
}

/// Returns the way holding a valid copy of `tag`.
#[inline]
fn find_hit(lines: &[CacheLine], tag: u32) -> Option<usize> {
    lines.iter().position(|line| line.is_valid() && line.tag() == tag)
}

/// Returns the way with the smallest order stamp, first on ties.
#[inline]
fn oldest(lines: &[CacheLine]) -> usize {
    lines
        .iter()
        .enumerate()
        .min_by_key(|(_, line)| line.order())
        .map_or(0, |(way, _)| way)
}
