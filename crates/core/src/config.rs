//! Configuration system for the cache simulator.
//!
//! This module defines the configuration structures used to parameterize a
//! simulated cache. It provides:
//! 1. **Defaults:** Baseline geometry used when a field is omitted.
//! 2. **Structures:** A single-cache [`CacheConfig`] and a multi-cache [`SweepConfig`].
//! 3. **Geometry:** Validation and derivation of the address field widths ([`CacheGeometry`]).
//!
//! Configuration is supplied from the CLI flags, from a JSON document, or
//! with `CacheConfig::default()`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::error::{ConfigError, SimError};

/// Default configuration constants for the simulator.
mod defaults {
    /// Default cache size in bytes (1 KiB).
    pub const CACHE_SIZE: u32 = 1024;

    /// Default cache line size in bytes.
    pub const LINE_SIZE: u32 = 32;

    /// Default lines per set (1 = direct-mapped).
    pub const LINES_PER_SET: u32 = 1;
}

/// Width of every simulated address, in bits.
pub const ADDRESS_BITS: u32 = 32;

/// Replacement policy used by set-associative and fully associative caches.
///
/// Ignored for direct-mapped caches, where every set holds a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReplacementPolicy {
    /// First In First Out replacement policy.
    ///
    /// Evicts the line installed earliest; hits do not change the order.
    #[serde(alias = "Fifo", alias = "fifo")]
    Fifo,
    /// Least Recently Used replacement policy.
    ///
    /// Evicts the line whose last hit or fill is oldest.
    #[default]
    #[serde(alias = "Lru", alias = "lru")]
    Lru,
}

impl fmt::Display for ReplacementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fifo => write!(f, "FIFO"),
            Self::Lru => write!(f, "LRU"),
        }
    }
}

impl FromStr for ReplacementPolicy {
    type Err = String;

    /// Parses `fifo`/`lru` in any case, plus the legacy `0` (FIFO) and `1` (LRU).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fifo" | "0" => Ok(Self::Fifo),
            "lru" | "1" => Ok(Self::Lru),
            other => Err(format!("unknown replacement policy `{other}` (expected fifo or lru)")),
        }
    }
}

/// Configuration for one simulated cache.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::{CacheConfig, ReplacementPolicy};
///
/// let json = r#"{ "size_bytes": 4096, "line_bytes": 64, "lines_per_set": 4, "policy": "FIFO" }"#;
/// let config = CacheConfig::from_json(json).unwrap();
/// assert_eq!(config.policy, ReplacementPolicy::Fifo);
///
/// let geometry = config.geometry().unwrap();
/// assert_eq!(geometry.total_lines, 64);
/// assert_eq!(geometry.num_sets, 16);
/// assert_eq!(geometry.offset_bits, 6);
/// assert_eq!(geometry.set_bits, 4);
/// assert_eq!(geometry.tag_bits, 22);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Total cache capacity in bytes. Must be a power of two.
    #[serde(default = "CacheConfig::default_size_bytes")]
    pub size_bytes: u32,

    /// Bytes per line. Must be a power of two no larger than `size_bytes`.
    #[serde(default = "CacheConfig::default_line_bytes")]
    pub line_bytes: u32,

    /// Associativity: 0 = fully associative, 1 = direct-mapped, N = N-way.
    #[serde(default = "CacheConfig::default_lines_per_set")]
    pub lines_per_set: u32,

    /// Replacement policy when `lines_per_set != 1`.
    #[serde(default)]
    pub policy: ReplacementPolicy,
}

impl CacheConfig {
    /// Creates a configuration from its four fields without validating it.
    pub const fn new(
        size_bytes: u32,
        line_bytes: u32,
        lines_per_set: u32,
        policy: ReplacementPolicy,
    ) -> Self {
        Self {
            size_bytes,
            line_bytes,
            lines_per_set,
            policy,
        }
    }

    /// Decodes a single configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Json`] if the document is not a valid `CacheConfig`.
    pub fn from_json(text: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Returns the default cache size.
    const fn default_size_bytes() -> u32 {
        defaults::CACHE_SIZE
    }

    /// Returns the default line size.
    const fn default_line_bytes() -> u32 {
        defaults::LINE_SIZE
    }

    /// Returns the default associativity (direct-mapped).
    const fn default_lines_per_set() -> u32 {
        defaults::LINES_PER_SET
    }

    /// Validates the configuration and derives the address field widths.
    ///
    /// A `lines_per_set` larger than the number of lines in the cache is
    /// clamped to fully associative, as the legacy tool did. The clamp is
    /// reported with a `warn` event.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if either size is not a positive power of
    /// two, if the line is larger than the cache, or if an N-way
    /// associativity is not a power of two.
    pub fn geometry(&self) -> Result<CacheGeometry, ConfigError> {
        if !self.size_bytes.is_power_of_two() {
            return Err(ConfigError::SizeNotPowerOfTwo(self.size_bytes));
        }
        if !self.line_bytes.is_power_of_two() {
            return Err(ConfigError::LineNotPowerOfTwo(self.line_bytes));
        }
        if self.line_bytes > self.size_bytes {
            return Err(ConfigError::LineLargerThanCache {
                line_bytes: self.line_bytes,
                size_bytes: self.size_bytes,
            });
        }

        let total_lines = self.size_bytes / self.line_bytes;
        let associativity = match self.lines_per_set {
            0 => Associativity::FullyAssociative,
            1 => Associativity::DirectMapped,
            n if n > total_lines => {
                tracing::warn!(
                    lines_per_set = n,
                    total_lines,
                    "lines per set exceeds total lines; clamping to fully associative"
                );
                Associativity::FullyAssociative
            }
            n if !n.is_power_of_two() => {
                return Err(ConfigError::AssociativityNotPowerOfTwo(n));
            }
            n => Associativity::SetAssociative(n),
        };

        let offset_bits = self.line_bytes.trailing_zeros();
        let (ways, set_bits) = match associativity {
            Associativity::FullyAssociative => (total_lines, 0),
            Associativity::DirectMapped => (1, total_lines.trailing_zeros()),
            Associativity::SetAssociative(n) => (n, (total_lines / n).trailing_zeros()),
        };

        Ok(CacheGeometry {
            associativity,
            total_lines: total_lines as usize,
            ways: ways as usize,
            num_sets: 1usize << set_bits,
            offset_bits,
            set_bits,
            tag_bits: ADDRESS_BITS - offset_bits - set_bits,
        })
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            size_bytes: defaults::CACHE_SIZE,
            line_bytes: defaults::LINE_SIZE,
            lines_per_set: defaults::LINES_PER_SET,
            policy: ReplacementPolicy::default(),
        }
    }
}

impl fmt::Display for CacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}B cache, {}B lines, ",
            self.size_bytes, self.line_bytes
        )?;
        match self.lines_per_set {
            0 => write!(f, "fully associative, {}", self.policy),
            1 => write!(f, "direct-mapped"),
            n => write!(f, "{n}-way, {}", self.policy),
        }
    }
}

/// How lines are grouped into sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Associativity {
    /// One line per set; the set field selects the line directly.
    DirectMapped,
    /// `N` lines per set, `N >= 2`.
    SetAssociative(u32),
    /// A single set holding every line; no set field.
    FullyAssociative,
}

impl fmt::Display for Associativity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DirectMapped => write!(f, "direct-mapped"),
            Self::SetAssociative(n) => write!(f, "{n}-way set-associative"),
            Self::FullyAssociative => write!(f, "fully associative"),
        }
    }
}

/// Field widths and counts derived from a validated [`CacheConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CacheGeometry {
    /// Associativity after the legacy clamp has been applied.
    pub associativity: Associativity,
    /// `size_bytes / line_bytes`.
    pub total_lines: usize,
    /// Lines per set after clamping (`total_lines` when fully associative).
    pub ways: usize,
    /// `2^set_bits`.
    pub num_sets: usize,
    /// `log2(line_bytes)`.
    pub offset_bits: u32,
    /// Width of the set index field; 0 when fully associative.
    pub set_bits: u32,
    /// `32 - offset_bits - set_bits`.
    pub tag_bits: u32,
}

impl CacheGeometry {
    /// Returns the set a physical slot belongs to.
    #[inline(always)]
    pub const fn set_of_slot(&self, slot: usize) -> usize {
        slot / self.ways
    }
}

/// A list of cache configurations evaluated over the same trace.
///
/// ```
/// use cachesim_core::config::SweepConfig;
///
/// let json = r#"{ "configs": [
///     { "size_bytes": 512, "line_bytes": 32, "lines_per_set": 1 },
///     { "size_bytes": 512, "line_bytes": 32, "lines_per_set": 0, "policy": "lru" }
/// ] }"#;
/// let sweep = SweepConfig::from_json(json).unwrap();
/// assert_eq!(sweep.configs.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Configurations in reporting order.
    #[serde(default)]
    pub configs: Vec<CacheConfig>,
}

impl SweepConfig {
    /// Decodes a sweep description from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Json`] if the document is not a valid `SweepConfig`.
    pub fn from_json(text: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(text)?)
    }
}
