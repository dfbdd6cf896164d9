//! Cache Replacement Policies.
//!
//! Implements victim selection for set-associative caches.
//!
//! # Policies
//!
//! - `Hawkeye`: OPTgen-trained PC predictor steering RRIP ages.
//! - `Srrip`: Static RRIP baseline.
//!
//! # Building blocks
//!
//! - `optgen`: bounded-history emulation of Belady's MIN.
//! - `predictor`: PC-indexed saturating counters trained by OPTgen.

/// Hawkeye replacement policy.
pub mod hawkeye;

/// Sampled optimal-replacement history (OPTgen).
pub mod optgen;

/// PC-indexed reuse predictor.
pub mod predictor;

/// Static RRIP replacement policy.
pub mod srrip;

pub use hawkeye::HawkeyePolicy;
pub use optgen::{Prediction, SampleEntry, SampledOptimalHistory, Verdict};
pub use predictor::ReusePredictor;
pub use srrip::SrripPolicy;

use crate::common::{ConfigError, LineId, MemAccess};
use crate::config::{CacheConfig, ReplacementPolicy as PolicyType};
use crate::stats::PolicyStats;

/// Trait for cache replacement policies.
///
/// The host cache drives a policy through three hooks:
///
/// 1. On a hit, `update(line, access)`.
/// 2. On a miss, the victim is the first invalid candidate, or
///    `rank(access, candidates)` when the set is full. The host calls
///    `replaced(victim)`, installs the new tag, then calls
///    `update(victim, access)` for the freshly filled line.
///
/// The policy never decides hit or miss itself; it trusts the host.
pub trait ReplacementPolicy {
    /// Updates policy state for an access that leaves `line` resident.
    ///
    /// # Arguments
    ///
    /// * `line` - The physical line that was hit or just filled.
    /// * `access` - The access descriptor.
    fn update(&mut self, line: LineId, access: &MemAccess);

    /// Notifies the policy that `line` was evicted and is about to be refilled.
    fn replaced(&mut self, _line: LineId) {}

    /// Selects the victim among `candidates` for an incoming `access`.
    ///
    /// `candidates` is the fixed, non-empty set of eligible line ids (one
    /// associativity set). It is iterated at most twice and never modified.
    ///
    /// # Returns
    ///
    /// The line id to evict.
    fn rank<C>(&mut self, access: &MemAccess, candidates: C) -> LineId
    where
        C: IntoIterator<Item = LineId>,
        C::IntoIter: Clone;
}

/// Enum wrapper for static dispatch of replacement policies.
///
/// `rank` is generic over the candidate iterator, so policies cannot sit
/// behind a trait object; the host selects a variant at configuration time.
#[derive(Clone, Debug)]
pub enum Policy {
    /// Hawkeye with the default hash.
    Hawkeye(HawkeyePolicy),
    /// Static RRIP.
    Srrip(SrripPolicy),
}

impl Policy {
    /// Creates the policy selected by `config`, sized for its geometry.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the geometry or policy parameters are invalid.
    pub fn new(config: &CacheConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let num_lines = config.num_lines();
        Ok(match config.policy {
            PolicyType::Hawkeye => {
                Self::Hawkeye(HawkeyePolicy::new(config.ways, num_lines, &config.hawkeye)?)
            }
            PolicyType::Srrip => Self::Srrip(SrripPolicy::new(num_lines, &config.rrip)?),
        })
    }

    /// The configuration variant this policy implements.
    pub const fn kind(&self) -> PolicyType {
        match self {
            Self::Hawkeye(_) => PolicyType::Hawkeye,
            Self::Srrip(_) => PolicyType::Srrip,
        }
    }

    /// Hawkeye counters, if this is a Hawkeye policy.
    pub const fn hawkeye_stats(&self) -> Option<&PolicyStats> {
        match self {
            Self::Hawkeye(p) => Some(p.stats()),
            Self::Srrip(_) => None,
        }
    }
}

impl ReplacementPolicy for Policy {
    #[inline]
    fn update(&mut self, line: LineId, access: &MemAccess) {
        match self {
            Self::Hawkeye(p) => p.update(line, access),
            Self::Srrip(p) => p.update(line, access),
        }
    }

    #[inline]
    fn replaced(&mut self, line: LineId) {
        match self {
            Self::Hawkeye(p) => p.replaced(line),
            Self::Srrip(p) => p.replaced(line),
        }
    }

    #[inline]
    fn rank<C>(&mut self, access: &MemAccess, candidates: C) -> LineId
    where
        C: IntoIterator<Item = LineId>,
        C::IntoIter: Clone,
    {
        match self {
            Self::Hawkeye(p) => p.rank(access, candidates),
            Self::Srrip(p) => p.rank(access, candidates),
        }
    }
}
