//! # Statistics Tests
//!
//! Counter bookkeeping and the ratio error for an empty trace.

use cachesim_core::CacheStats;
use cachesim_core::common::{Access, StatsError};

fn stats(hits: u64, misses: u64) -> CacheStats {
    CacheStats { hits, misses }
}

#[test]
fn test_default_counters_are_zero() {
    let s = CacheStats::default();
    assert_eq!(s.hits, 0);
    assert_eq!(s.misses, 0);
    assert_eq!(s.accesses(), 0);
}

#[test]
fn test_record_counts_each_outcome() {
    let mut s = CacheStats::default();
    for access in [Access::Miss, Access::Hit, Access::Miss, Access::Miss] {
        s.record(access);
    }
    assert_eq!(s, stats(1, 3));
    assert_eq!(s.accesses(), 4);
}

#[test]
fn test_hit_ratio_is_exact_division() {
    assert_eq!(stats(1, 2).hit_ratio().unwrap(), 1.0 / 3.0);
    assert_eq!(stats(3, 1).hit_ratio().unwrap(), 0.75);
    assert_eq!(stats(0, 5).hit_ratio().unwrap(), 0.0);
    assert_eq!(stats(5, 0).hit_ratio().unwrap(), 1.0);
}

#[test]
fn test_miss_ratio_complements_hit_ratio() {
    let s = stats(3, 1);
    assert_eq!(s.miss_ratio().unwrap(), 0.25);
    assert_eq!(s.hit_ratio().unwrap() + s.miss_ratio().unwrap(), 1.0);
}

#[test]
fn test_ratios_without_accesses_are_errors() {
    let s = CacheStats::default();
    assert!(matches!(s.hit_ratio(), Err(StatsError::NoAccesses)));
    assert!(matches!(s.miss_ratio(), Err(StatsError::NoAccesses)));
}

#[test]
fn test_stats_serialize_as_counters() {
    let json = serde_json::to_value(stats(7, 9)).unwrap();
    assert_eq!(json, serde_json::json!({ "hits": 7, "misses": 9 }));
}

#[test]
fn test_counters_accumulate_in_const_context() {
    const STATS: CacheStats = {
        let mut s = CacheStats { hits: 0, misses: 0 };
        s.record(Access::Miss);
        s.record(Access::Hit);
        s.record(Access::Hit);
        s
    };
    const TOTAL: u64 = STATS.accesses();

    assert_eq!(STATS, stats(2, 1));
    assert_eq!(TOTAL, 3);
}
