//! Set-Associative Cache State.
//!
//! This module owns the simulated line storage. Lines are allocated once,
//! when the cache is built, and are grouped into sets by position: slot `i`
//! belongs to set `i / ways` (all slots belong to set 0 when the cache is
//! fully associative). After construction lines are only mutated, never
//! created or destroyed.
//!
//! Hit detection and victim selection are delegated to the
//! [`ReplacementPolicy`](policies::ReplacementPolicy), which only ever sees
//! the slice of lines belonging to the addressed set.

/// Address decoder (tag/set/offset extraction).
pub mod decoder;

/// Cache replacement policy implementations (direct-mapped, FIFO, LRU).
pub mod policies;

use self::policies::ReplacementPolicy;
use crate::common::addr::Access;
use crate::common::error::ConfigError;
use crate::config::{CacheConfig, CacheGeometry, ReplacementPolicy as PolicyType};

/// One storage slot of the cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheLine {
    valid: bool,
    tag: u32,
    address: u32,
    order: u64,
}

impl CacheLine {
    /// Whether the line holds data.
    #[inline(always)]
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// Tag of the resident block. Meaningless when the line is invalid.
    #[inline(always)]
    pub const fn tag(&self) -> u32 {
        self.tag
    }

    /// Address of the access that filled the line. Diagnostic only.
    #[inline(always)]
    pub const fn address(&self) -> u32 {
        self.address
    }

    /// Policy-dependent stamp: fill number under FIFO, last touch under LRU,
    /// 0 for direct-mapped and for invalid lines.
    #[inline(always)]
    pub const fn order(&self) -> u64 {
        self.order
    }

    /// Overwrites the line with a new block.
    pub(crate) const fn install(&mut self, tag: u32, address: u32, order: u64) {
        self.valid = true;
        self.tag = tag;
        self.address = address;
        self.order = order;
    }

    /// Updates the stamp without changing the resident block.
    pub(crate) const fn touch(&mut self, order: u64) {
        self.order = order;
    }
}

/// Line storage for one simulated cache plus its replacement state.
#[derive(Debug, Clone)]
pub struct CacheState {
    lines: Vec<CacheLine>,
    geometry: CacheGeometry,
    policy: ReplacementPolicy,
}

impl CacheState {
    /// Validates `config` and allocates an empty cache for it.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] from [`CacheConfig::geometry`].
    pub fn new(config: &CacheConfig) -> Result<Self, ConfigError> {
        let geometry = config.geometry()?;
        Ok(Self::with_geometry(geometry, config.policy))
    }

    /// Allocates an empty cache for an already validated geometry.
    pub fn with_geometry(geometry: CacheGeometry, policy: PolicyType) -> Self {
        let policy = ReplacementPolicy::new(&geometry, policy);
        tracing::debug!(
            total_lines = geometry.total_lines,
            sets = geometry.num_sets,
            ways = geometry.ways,
            policy = policy.name(),
            "allocating cache lines"
        );
        Self {
            lines: vec![CacheLine::default(); geometry.total_lines],
            geometry,
            policy,
        }
    }

    /// Looks up `tag` in set `set`, installing it on a miss.
    ///
    /// # Arguments
    ///
    /// * `set` - Set index produced by the decoder.
    /// * `tag` - Tag produced by the decoder.
    /// * `address` - The full address, recorded in the filled line.
    /// * `sequence` - Global access number (1 for the first access).
    ///
    /// # Panics
    ///
    /// Panics if `set >= num_sets`. The decoder never produces such an
    /// index for the geometry this cache was built with.
    pub fn lookup_or_insert(
        &mut self,
        set: usize,
        tag: u32,
        address: u32,
        sequence: u64,
    ) -> Access {
        assert!(
            set < self.geometry.num_sets,
            "set index {set} out of range for {} sets",
            self.geometry.num_sets
        );
        let base = set * self.geometry.ways;
        let ways = &mut self.lines[base..base + self.geometry.ways];
        let decision = self.policy.access(ways, tag, address, sequence);

        if let Some(evicted) = decision.evicted {
            tracing::trace!(set, way = decision.way, evicted, tag, "evict");
        }
        decision.access
    }

    /// Returns `true` if set `set` holds a valid line with `tag`. Does not
    /// update any replacement state.
    ///
    /// # Panics
    ///
    /// Panics if `set >= num_sets`.
    pub fn contains(&self, set: usize, tag: u32) -> bool {
        self.set_lines(set)
            .iter()
            .any(|line| line.is_valid() && line.tag() == tag)
    }

    /// Returns the line in physical slot `index`.
    pub fn line(&self, index: usize) -> Option<&CacheLine> {
        self.lines.get(index)
    }

    /// All lines, in slot order.
    pub fn lines(&self) -> &[CacheLine] {
        &self.lines
    }

    /// The lines of one set, in way order.
    ///
    /// # Panics
    ///
    /// Panics if `set >= num_sets`.
    pub fn set_lines(&self, set: usize) -> &[CacheLine] {
        let base = set * self.geometry.ways;
        &self.lines[base..base + self.geometry.ways]
    }

    /// Number of lines currently holding data.
    pub fn valid_lines(&self) -> usize {
        self.lines.iter().filter(|line| line.is_valid()).count()
    }

    /// Geometry this cache was built with.
    pub const fn geometry(&self) -> &CacheGeometry {
        &self.geometry
    }

    /// Active replacement policy.
    pub const fn policy(&self) -> &ReplacementPolicy {
        &self.policy
    }
}
