//! Shared fixtures.

use hawkeye_core::cache::policies::HawkeyePolicy;
use hawkeye_core::common::IdentityHash;
use hawkeye_core::config::{CacheConfig, HawkeyeConfig, ReplacementPolicy};

/// PC used for accesses to a reused working set.
pub const HOT_PC: u64 = 0x0040_0a10;
/// PC used for accesses that thrash or stream.
pub const SCAN_PC: u64 = 0x0040_0b20;

/// Installs a test subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Hawkeye parameters with a single sampled set.
pub fn single_sample_set() -> HawkeyeConfig {
    HawkeyeConfig {
        sample_sets: 1,
        ..HawkeyeConfig::default()
    }
}

/// Hawkeye policy over one `ways`-way set, sampling that set, with identity indexing.
pub fn one_set_hawkeye(ways: usize) -> HawkeyePolicy<IdentityHash> {
    HawkeyePolicy::with_hasher(ways, ways, &single_sample_set(), IdentityHash)
        .unwrap_or_else(|e| panic!("valid test config rejected: {e}"))
}

/// A single-set cache of `ways` 64-byte lines.
pub fn one_set_cache(ways: usize, policy: ReplacementPolicy) -> CacheConfig {
    CacheConfig {
        size_bytes: ways * 64,
        line_bytes: 64,
        ways,
        policy,
        hawkeye: single_sample_set(),
        ..CacheConfig::default()
    }
}

/// `rounds` repetitions of a 4-line hot loop followed by one access that
/// alternates between two scan lines. Byte addresses, 64-byte lines.
///
/// Under MIN with 4 ways the hot lines always hit and the scan lines always
/// miss, so the scan PC must learn to be cache-averse.
pub fn hot_loop_with_scan(rounds: usize) -> Vec<(u64, u64)> {
    let mut trace = Vec::with_capacity(rounds * 5);
    for round in 0..rounds {
        for line in 100..104 {
            trace.push((line * 64, HOT_PC));
        }
        trace.push(((200 + (round as u64 % 2)) * 64, SCAN_PC));
    }
    trace
}
