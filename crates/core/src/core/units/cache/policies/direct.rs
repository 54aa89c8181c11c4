//! Direct-Mapped Placement.
//!
//! Every set holds exactly one line, so there is no choice to make: the
//! line either holds the incoming tag or is overwritten. No ordering state
//! is read or written.

use super::{Decision, find_hit};
use crate::core::units::cache::CacheLine;

/// Direct-mapped policy. Stateless.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectMappedPolicy;

impl DirectMappedPolicy {
    /// Hits iff the set's single line is valid with the same tag;
    /// otherwise overwrites it.
    pub fn access(self, lines: &mut [CacheLine], tag: u32, address: u32) -> Decision {
        debug_assert_eq!(lines.len(), 1, "direct-mapped sets hold one line");
        if let Some(way) = find_hit(lines, tag) {
            return Decision::hit(way);
        }
        let decision = Decision::miss(0, &lines[0]);
        lines[0].install(tag, address, 0);
        decision
    }
}
