//! First-In, First-Out (FIFO) Replacement Policy.
//!
//! This policy evicts the line that was filled earliest, regardless of how
//! often or how recently it has been hit since. Each miss stamps the filled
//! line with the next value of an insertion counter; hits never touch the
//! stamp, so arrival order of misses alone decides the victim.
//!
//! # Performance
//!
//! - **Time Complexity:** O(W) per access, W = lines per set
//! - **Space Complexity:** O(1) beyond the per-line stamp
//! - **Best Case:** Streaming accesses where all lines have equal importance
//! - **Worst Case:** Workloads with strong temporal locality (hot lines age out)

use super::{Decision, find_hit, oldest};
use crate::core::units::cache::CacheLine;

/// FIFO Policy state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FifoPolicy {
    /// Stamp given to the next filled line. Starts at 1 so that it always
    /// outranks an empty slot.
    next_stamp: u64,
}

impl FifoPolicy {
    /// Creates a FIFO policy with no fills recorded.
    pub const fn new() -> Self {
        Self { next_stamp: 1 }
    }

    /// Number of fills performed so far.
    pub const fn fills(&self) -> u64 {
        self.next_stamp - 1
    }

    /// Looks up `tag`; on a miss, replaces the earliest-filled line.
    pub fn access(&mut self, lines: &mut [CacheLine], tag: u32, address: u32) -> Decision {
        if let Some(way) = find_hit(lines, tag) {
            return Decision::hit(way);
        }

        let way = oldest(lines);
        let decision = Decision::miss(way, &lines[way]);
        lines[way].install(tag, address, self.next_stamp);
        self.next_stamp += 1;
        decision
    }
}

impl Default for FifoPolicy {
    fn default() -> Self {
        Self::new()
    }
}
