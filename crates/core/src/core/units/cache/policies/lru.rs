//! Least Recently Used (LRU) Replacement Policy.
//!
//! This policy evicts the line that has gone longest without being touched.
//! Every hit and every fill stamps the line with the global access sequence
//! number, so the smallest stamp in a set is its least recently used line.
//!
//! # Performance
//!
//! - **Time Complexity:** O(W) per access, W = lines per set
//! - **Space Complexity:** O(1) beyond the per-line stamp
//! - **Best Case:** Accesses with good temporal locality
//! - **Worst Case:** Cyclic scans one line larger than the set (every access misses)

use super::{Decision, find_hit, oldest};
use crate::core::units::cache::CacheLine;

/// LRU policy. Recency lives in the line stamps, so the policy is stateless.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LruPolicy;

impl LruPolicy {
    /// Looks up `tag`, refreshing its recency on a hit; on a miss, replaces
    /// the least recently used line.
    ///
    /// `sequence` must be at least 1 and increase with every access.
    pub fn access(
        self,
        lines: &mut [CacheLine],
        tag: u32,
        address: u32,
        sequence: u64,
    ) -> Decision {
        debug_assert!(sequence > 0, "sequence numbers start at 1");
        if let Some(way) = find_hit(lines, tag) {
            lines[way].touch(sequence);
            return Decision::hit(way);
        }

        let way = oldest(lines);
        let decision = Decision::miss(way, &lines[way]);
        lines[way].install(tag, address, sequence);
        decision
    }
}
