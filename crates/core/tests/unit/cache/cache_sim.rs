//! Cache Simulator Tests.
//!
//! Geometry, hit/miss accounting, and the host protocol that drives the
//! policies, plus an end-to-end comparison of Hawkeye against SRRIP on a
//! pattern SRRIP cannot handle.

use hawkeye_core::cache::CacheSim;
use hawkeye_core::cache::policies::Policy;
use hawkeye_core::common::ConfigError;
use hawkeye_core::config::{CacheConfig, ReplacementPolicy};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::{HOT_PC, SCAN_PC, hot_loop_with_scan, init_tracing, one_set_cache};

fn run(config: &CacheConfig, trace: &[(u64, u64)]) -> CacheSim {
    let mut cache = CacheSim::new(config).unwrap();
    for &(addr, pc) in trace {
        let _ = cache.access(addr, pc);
    }
    cache
}

#[test]
fn default_geometry() {
    let cache = CacheSim::new(&CacheConfig::default()).unwrap();
    assert_eq!(cache.ways(), 8);
    assert_eq!(cache.num_sets(), 64);
    assert_eq!(cache.policy().kind(), ReplacementPolicy::Hawkeye);
}

#[rstest]
#[case(4096, 64, 0)]
#[case(4096, 0, 4)]
#[case(4096, 64, 3)]
#[case(100, 64, 1)]
#[case(32, 64, 1)]
fn invalid_geometry_rejected(
    #[case] size_bytes: usize,
    #[case] line_bytes: usize,
    #[case] ways: usize,
) {
    let config = CacheConfig {
        size_bytes,
        line_bytes,
        ways,
        ..CacheConfig::default()
    };
    assert!(CacheSim::new(&config).is_err());
}

#[test]
fn invalid_policy_parameters_rejected() {
    let mut config = CacheConfig::default();
    config.hawkeye.sample_sets = 12;
    assert!(matches!(
        CacheSim::new(&config),
        Err(ConfigError::SampleSetsNotPowerOfTwo(12))
    ));
}

#[rstest]
#[case(ReplacementPolicy::Hawkeye)]
#[case(ReplacementPolicy::Srrip)]
fn miss_then_hit(#[case] policy: ReplacementPolicy) {
    let mut cache = CacheSim::new(&one_set_cache(4, policy)).unwrap();
    assert!(!cache.contains(0x1000));
    assert!(!cache.access(0x1000, HOT_PC));
    assert!(cache.contains(0x1000));
    assert!(cache.contains(0x103f), "same 64-byte line");
    assert!(cache.access(0x1008, HOT_PC));

    let stats = cache.stats();
    assert_eq!((stats.accesses, stats.hits, stats.misses), (2, 1, 1));
}

#[test]
fn srrip_fills_empty_ways_without_evicting() {
    let cache = run(
        &one_set_cache(4, ReplacementPolicy::Srrip),
        &[(0, 0x1), (64, 0x1), (128, 0x1), (192, 0x1)],
    );
    assert_eq!(cache.stats().evictions, 0);
    assert!((0..4).all(|i| cache.contains(i * 64)));
}

/// Invalid ways are filled before any resident line is displaced, even
/// though a cold Hawkeye predictor gives every fill the sentinel age.
#[rstest]
#[case(ReplacementPolicy::Hawkeye)]
#[case(ReplacementPolicy::Srrip)]
fn cold_set_fills_every_way_before_evicting(#[case] policy: ReplacementPolicy) {
    let mut cache = CacheSim::new(&one_set_cache(4, policy)).unwrap();
    for line in 0..4 {
        assert!(!cache.access(line * 64, HOT_PC));
        assert_eq!(cache.stats().evictions, 0);
    }
    assert!((0..4).all(|line| cache.contains(line * 64)));

    assert!(!cache.access(4 * 64, HOT_PC));
    assert_eq!(cache.stats().evictions, 1);
    assert!(cache.contains(4 * 64));
}

#[test]
fn small_working_set_hits_with_cold_predictor() {
    let mut cache = CacheSim::new(&one_set_cache(4, ReplacementPolicy::Hawkeye)).unwrap();
    let hits: Vec<bool> = [0, 64, 0, 64, 0, 64]
        .into_iter()
        .map(|addr| cache.access(addr, HOT_PC))
        .collect();
    assert_eq!(hits, vec![false, false, true, true, true, true]);
    assert_eq!(cache.stats().evictions, 0);
}

#[test]
fn flush_invalidates_lines() {
    let mut cache = run(&one_set_cache(4, ReplacementPolicy::Srrip), &[(0, 0x1)]);
    cache.flush();
    assert!(!cache.contains(0));
    assert!(!cache.access(0, 0x1));
}

/// Four hot lines plus a thrashing scan line in one 4-way set. SRRIP inserts
/// everything at the same age and cycles through all five lines. Hawkeye
/// learns that the scan PC is averse: each scan fill is the next victim, so
/// the scan costs one hot miss per round instead of four.
#[test]
fn hawkeye_protects_hot_loop_from_scan() {
    init_tracing();
    let trace = hot_loop_with_scan(40);

    let hawkeye = run(&one_set_cache(4, ReplacementPolicy::Hawkeye), &trace);
    let srrip = run(&one_set_cache(4, ReplacementPolicy::Srrip), &trace);

    assert_eq!(srrip.stats().hits, 0);
    assert_eq!(hawkeye.stats().hits, 117);

    let Policy::Hawkeye(policy) = hawkeye.policy() else {
        panic!("expected hawkeye policy");
    };
    assert!(policy.predictor().is_friendly(HOT_PC));
    assert_eq!(policy.predictor().counter(SCAN_PC), 0);
    assert!(policy.stats().opt_misses > 0);

    // The last access was a scan fill; it displaced one hot line.
    let hot_resident = (100..104).filter(|line| hawkeye.contains(line * 64)).count();
    assert_eq!(hot_resident, 3);
    assert!(hawkeye.contains(201 * 64));
}
