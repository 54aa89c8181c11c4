//! # Configuration Tests
//!
//! Geometry derivation, validation failures, the legacy associativity
//! clamp, and JSON deserialization.

use rstest::rstest;

use cachesim_core::common::ConfigError;
use cachesim_core::config::*;

#[test]
fn test_cache_config_defaults() {
    let config = CacheConfig::default();
    assert_eq!(config.size_bytes, 1024);
    assert_eq!(config.line_bytes, 32);
    assert_eq!(config.lines_per_set, 1);
    assert_eq!(config.policy, ReplacementPolicy::Lru);
}

#[test]
fn test_direct_mapped_geometry() {
    let g = CacheConfig::new(1024, 32, 1, ReplacementPolicy::Lru)
        .geometry()
        .unwrap();
    assert_eq!(g.associativity, Associativity::DirectMapped);
    assert_eq!(g.total_lines, 32);
    assert_eq!(g.ways, 1);
    assert_eq!(g.num_sets, 32);
    assert_eq!(g.offset_bits, 5);
    assert_eq!(g.set_bits, 5);
    assert_eq!(g.tag_bits, 22);
}

#[test]
fn test_set_associative_geometry() {
    let g = CacheConfig::new(8192, 64, 4, ReplacementPolicy::Fifo)
        .geometry()
        .unwrap();
    assert_eq!(g.associativity, Associativity::SetAssociative(4));
    assert_eq!(g.total_lines, 128);
    assert_eq!(g.ways, 4);
    assert_eq!(g.num_sets, 32);
    assert_eq!(g.offset_bits, 6);
    assert_eq!(g.set_bits, 5);
    assert_eq!(g.tag_bits, 21);
}

#[test]
fn test_fully_associative_geometry() {
    let g = CacheConfig::new(512, 32, 0, ReplacementPolicy::Lru)
        .geometry()
        .unwrap();
    assert_eq!(g.associativity, Associativity::FullyAssociative);
    assert_eq!(g.ways, 16);
    assert_eq!(g.num_sets, 1);
    assert_eq!(g.set_bits, 0);
    assert_eq!(g.tag_bits, 27);
}

#[test]
fn test_ways_equal_to_total_lines_is_one_set() {
    let g = CacheConfig::new(256, 32, 8, ReplacementPolicy::Lru)
        .geometry()
        .unwrap();
    assert_eq!(g.associativity, Associativity::SetAssociative(8));
    assert_eq!(g.num_sets, 1);
    assert_eq!(g.set_bits, 0);
}

#[test]
fn test_single_line_cache() {
    let g = CacheConfig::new(64, 64, 1, ReplacementPolicy::Lru)
        .geometry()
        .unwrap();
    assert_eq!(g.total_lines, 1);
    assert_eq!(g.num_sets, 1);
    assert_eq!(g.set_bits, 0);
    assert_eq!(g.tag_bits, 26);
}

/// The legacy tool turned an associativity larger than the cache into a
/// fully associative cache. That clamp is kept, and is the only one.
#[rstest]
#[case(128, 32, 8)]
#[case(128, 32, 5)]
#[case(1024, 64, 17)]
#[case(64, 64, 2)]
fn test_oversized_associativity_clamps_to_fully_associative(
    #[case] size: u32,
    #[case] line: u32,
    #[case] lines_per_set: u32,
) {
    let g = CacheConfig::new(size, line, lines_per_set, ReplacementPolicy::Fifo)
        .geometry()
        .unwrap();
    assert_eq!(g.associativity, Associativity::FullyAssociative);
    assert_eq!(g.ways, g.total_lines);
    assert_eq!(g.num_sets, 1);
    assert_eq!(g.set_bits, 0);
}

#[rstest]
#[case::zero_size(0, 32, 1, ConfigError::SizeNotPowerOfTwo(0))]
#[case::odd_size(1000, 32, 1, ConfigError::SizeNotPowerOfTwo(1000))]
#[case::zero_line(1024, 0, 1, ConfigError::LineNotPowerOfTwo(0))]
#[case::odd_line(1024, 48, 1, ConfigError::LineNotPowerOfTwo(48))]
#[case::line_too_big(
    1024,
    2048,
    1,
    ConfigError::LineLargerThanCache { line_bytes: 2048, size_bytes: 1024 }
)]
#[case::three_way(1024, 32, 3, ConfigError::AssociativityNotPowerOfTwo(3))]
#[case::six_way(4096, 32, 6, ConfigError::AssociativityNotPowerOfTwo(6))]
fn test_invalid_geometry_is_rejected(
    #[case] size: u32,
    #[case] line: u32,
    #[case] lines_per_set: u32,
    #[case] expected: ConfigError,
) {
    let err = CacheConfig::new(size, line, lines_per_set, ReplacementPolicy::Lru)
        .geometry()
        .unwrap_err();
    assert_eq!(err, expected);
}

#[test]
fn test_slot_to_set_assignment() {
    let g = CacheConfig::new(256, 32, 2, ReplacementPolicy::Lru)
        .geometry()
        .unwrap();
    let sets: Vec<usize> = (0..g.total_lines).map(|slot| g.set_of_slot(slot)).collect();
    assert_eq!(sets, vec![0, 0, 1, 1, 2, 2, 3, 3]);

    let fully = CacheConfig::new(256, 32, 0, ReplacementPolicy::Lru)
        .geometry()
        .unwrap();
    assert!((0..fully.total_lines).all(|slot| fully.set_of_slot(slot) == 0));
}

#[rstest]
#[case("fifo", ReplacementPolicy::Fifo)]
#[case("FIFO", ReplacementPolicy::Fifo)]
#[case("0", ReplacementPolicy::Fifo)]
#[case("lru", ReplacementPolicy::Lru)]
#[case(" Lru ", ReplacementPolicy::Lru)]
#[case("1", ReplacementPolicy::Lru)]
fn test_policy_from_str(#[case] text: &str, #[case] expected: ReplacementPolicy) {
    assert_eq!(text.parse::<ReplacementPolicy>().unwrap(), expected);
}

#[test]
fn test_policy_from_str_rejects_unknown() {
    assert!("mru".parse::<ReplacementPolicy>().is_err());
}

#[test]
fn test_config_from_json_with_defaults() {
    let config = CacheConfig::from_json(r#"{ "lines_per_set": 0, "policy": "fifo" }"#).unwrap();
    assert_eq!(config.size_bytes, 1024);
    assert_eq!(config.line_bytes, 32);
    assert_eq!(config.lines_per_set, 0);
    assert_eq!(config.policy, ReplacementPolicy::Fifo);
}

#[test]
fn test_config_from_json_policy_spellings() {
    for text in ["\"LRU\"", "\"Lru\"", "\"lru\""] {
        let json = format!(r#"{{ "policy": {text} }}"#);
        assert_eq!(
            CacheConfig::from_json(&json).unwrap().policy,
            ReplacementPolicy::Lru
        );
    }
}

#[test]
fn test_config_from_json_rejects_bad_policy() {
    assert!(CacheConfig::from_json(r#"{ "policy": "RANDOM" }"#).is_err());
}

#[test]
fn test_config_serializes_round_trip_through_json() {
    let config = CacheConfig::new(2048, 64, 2, ReplacementPolicy::Fifo);
    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains("\"policy\":\"FIFO\""));
    assert_eq!(CacheConfig::from_json(&json).unwrap(), config);
}

#[test]
fn test_sweep_config_from_json() {
    let sweep = SweepConfig::from_json(
        r#"{ "configs": [ { "size_bytes": 512 }, { "size_bytes": 1024, "lines_per_set": 2 } ] }"#,
    )
    .unwrap();
    assert_eq!(sweep.configs.len(), 2);
    assert_eq!(sweep.configs[0].size_bytes, 512);
    assert_eq!(sweep.configs[1].lines_per_set, 2);
    assert!(SweepConfig::from_json("{}").unwrap().configs.is_empty());
}

#[test]
fn test_config_display() {
    assert_eq!(
        CacheConfig::new(1024, 32, 1, ReplacementPolicy::Lru).to_string(),
        "1024B cache, 32B lines, direct-mapped"
    );
    assert_eq!(
        CacheConfig::new(4096, 64, 4, ReplacementPolicy::Fifo).to_string(),
        "4096B cache, 64B lines, 4-way, FIFO"
    );
    assert_eq!(
        CacheConfig::new(512, 32, 0, ReplacementPolicy::Lru).to_string(),
        "512B cache, 32B lines, fully associative, LRU"
    );
}

#[test]
fn test_slot_to_set_is_const() {
    const GEOMETRY: CacheGeometry = CacheGeometry {
        associativity: Associativity::SetAssociative(4),
        total_lines: 16,
        ways: 4,
        num_sets: 4,
        offset_bits: 5,
        set_bits: 2,
        tag_bits: 25,
    };
    const LAST_SET: usize = GEOMETRY.set_of_slot(15);

    assert_eq!(LAST_SET, 3);
    assert_eq!(
        GEOMETRY,
        CacheConfig::new(512, 32, 4, ReplacementPolicy::Lru)
            .geometry()
            .unwrap()
    );
}
