//! Static RRIP Tests.
//!
//! Insertion and promotion ages, the deficit-aging victim search, and the
//! fill protocol (`rank`, `replaced`, `update`).

use hawkeye_core::cache::policies::{ReplacementPolicy, SrripPolicy};
use hawkeye_core::common::{ConfigError, LineId, MemAccess};
use hawkeye_core::config::RripConfig;
use pretty_assertions::assert_eq;

const ACCESS: MemAccess = MemAccess::new(0x1, 0x40);

fn srrip(lines: usize) -> SrripPolicy {
    SrripPolicy::new(lines, &RripConfig::default()).unwrap()
}

/// Runs the host fill protocol on `candidates` and returns the filled line.
fn fill(policy: &mut SrripPolicy, candidates: std::ops::Range<LineId>) -> LineId {
    let victim = policy.rank(&ACCESS, candidates);
    policy.replaced(victim);
    policy.update(victim, &ACCESS);
    victim
}

#[test]
fn lines_start_at_max_age() {
    let policy = srrip(4);
    assert_eq!(policy.age_max(), 3);
    assert_eq!(policy.ages(), &[3, 3, 3, 3]);
}

#[test]
fn fill_inserts_at_long_reuse_age() {
    let mut policy = srrip(4);
    assert_eq!(fill(&mut policy, 0..4), 0);
    assert_eq!(policy.ages(), &[2, 3, 3, 3]);
}

#[test]
fn empty_ways_fill_in_order() {
    let mut policy = srrip(4);
    let filled: Vec<LineId> = (0..4).map(|_| fill(&mut policy, 0..4)).collect();
    assert_eq!(filled, vec![0, 1, 2, 3]);
    assert_eq!(policy.ages(), &[2, 2, 2, 2]);
}

#[test]
fn hit_promotes_to_zero() {
    let mut policy = srrip(4);
    let _ = fill(&mut policy, 0..4);
    policy.update(0, &ACCESS);
    assert_eq!(policy.age(0), 0);
}

/// No line at the max: everything ages by the oldest line's deficit.
#[test]
fn deficit_aging_picks_oldest() {
    let mut policy = srrip(4);
    for _ in 0..4 {
        let _ = fill(&mut policy, 0..4);
    }
    policy.update(1, &ACCESS);
    assert_eq!(policy.ages(), &[2, 0, 2, 2]);

    let victim = policy.rank(&ACCESS, 0..4);
    assert_eq!(victim, 0);
    assert_eq!(policy.ages(), &[3, 1, 3, 3]);
}

#[test]
fn rank_at_max_does_not_age() {
    let mut policy = srrip(4);
    let _ = fill(&mut policy, 0..4);
    let victim = policy.rank(&ACCESS, 0..4);
    assert_eq!(victim, 1);
    assert_eq!(policy.ages(), &[2, 3, 3, 3]);
}

#[test]
#[should_panic(expected = "empty candidate set")]
fn empty_candidate_set_panics() {
    let mut policy = srrip(4);
    let _ = policy.rank(&ACCESS, 0..0);
}

#[test]
fn age_max_below_two_rejected() {
    assert!(matches!(
        SrripPolicy::new(4, &RripConfig { age_max: 1 }),
        Err(ConfigError::AgeMax(1))
    ));
}
