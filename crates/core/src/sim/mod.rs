//! Trace-driven replay.
//!
//! Loads address/PC traces and runs them through a configured cache,
//! collecting the cache and policy counters into a [`ReplayReport`].

/// Trace file parsing.
pub mod trace;

use std::fmt;

use serde::Serialize;

use self::trace::TraceRecord;
use crate::cache::CacheSim;
use crate::common::ConfigError;
use crate::config::{CacheConfig, ReplacementPolicy};
use crate::stats::{CacheStats, PolicyStats};

/// Outcome of replaying one trace under one configuration.
#[derive(Clone, Debug, Serialize)]
pub struct ReplayReport {
    /// Policy the cache ran.
    pub policy: String,
    /// Cache counters.
    pub cache: CacheStats,
    /// Hawkeye counters; absent for policies without a predictor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hawkeye: Option<PolicyStats>,
}

impl fmt::Display for ReplayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "==========================================================")?;
        writeln!(f, "REPLACEMENT POLICY: {}", self.policy)?;
        writeln!(f, "==========================================================")?;
        write!(f, "{}", self.cache)?;
        if let Some(stats) = &self.hawkeye {
            writeln!(f, "----------------------------------------------------------")?;
            write!(f, "{stats}")?;
        }
        Ok(())
    }
}

/// Human-readable policy name.
const fn policy_name(policy: ReplacementPolicy) -> &'static str {
    match policy {
        ReplacementPolicy::Hawkeye => "hawkeye",
        ReplacementPolicy::Srrip => "srrip",
    }
}

/// Replays `trace` through a fresh cache built from `config`.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the cache cannot be constructed.
pub fn replay(config: &CacheConfig, trace: &[TraceRecord]) -> Result<ReplayReport, ConfigError> {
    let mut cache = CacheSim::new(config)?;
    for record in trace {
        let _ = cache.access(record.addr, record.pc);
    }
    tracing::debug!(
        accesses = cache.stats().accesses,
        hits = cache.stats().hits,
        "replay finished"
    );
    Ok(ReplayReport {
        policy: policy_name(config.policy).to_string(),
        cache: *cache.stats(),
        hawkeye: cache.policy().hawkeye_stats().copied(),
    })
}
