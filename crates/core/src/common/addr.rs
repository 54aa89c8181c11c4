//! Decoded address fields and access outcomes.
//!
//! A 32-bit address is split into three fields by the cache geometry:
//!
//! ```text
//!  31                 offset+set   offset            0
//! +----------------------+------------+---------------+
//! |         tag          |    set     |    offset     |
//! +----------------------+------------+---------------+
//! ```

use std::fmt;

use serde::Serialize;

/// The tag, set index, and byte offset of one address under a given geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DecodedAddress {
    /// Bits above the set field; identifies the line within its set.
    pub tag: u32,
    /// Set index field; always `< num_sets`.
    pub set: u32,
    /// Byte offset within the line. Not used for hit/miss classification.
    pub offset: u32,
}

impl DecodedAddress {
    /// Returns the set index as a slice index.
    #[inline(always)]
    pub const fn set_index(&self) -> usize {
        self.set as usize
    }
}

/// Classification of a single cache access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    /// The addressed line was resident.
    Hit,
    /// The addressed line was not resident and has now been installed.
    Miss,
}

impl Access {
    /// Returns `true` for [`Access::Hit`].
    #[inline(always)]
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Hit)
    }

    /// Returns `true` for [`Access::Miss`].
    #[inline(always)]
    pub const fn is_miss(self) -> bool {
        matches!(self, Self::Miss)
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hit => write!(f, "HIT"),
            Self::Miss => write!(f, "MISS"),
        }
    }
}
