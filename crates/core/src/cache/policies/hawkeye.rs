//! Hawkeye Replacement Policy.
//!
//! Hawkeye learns from Belady's MIN which instructions insert lines worth
//! keeping, then applies that knowledge through cheap RRIP ages:
//!
//! 1. Every access is replayed through OPTgen, which judges whether MIN would
//!    have hit on it.
//! 2. The verdict trains the reuse predictor for the PC that inserted the
//!    previous occurrence of the line.
//! 3. Lines touched by a friendly PC get age 0; lines touched by an averse
//!    PC get the maximum age and become the next victims.
//! 4. On eviction, a friendly victim (age below the maximum) was a wasted
//!    insertion, so its inserting PC is detrained.
//!
//! The maximum age doubles as the "evict first" sentinel. Every line starts
//! there, and the host fills invalid ways before it asks for a victim, so
//! `rank` only ever chooses among resident lines.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `update()`: O(L) for the OPTgen scan, L = sampler history length
//!   - `rank()`: O(W + L), W = candidates per call
//! - **Space Complexity:** O(N) ages and resident addresses for N lines, plus
//!   the predictor table and sampler history

use super::ReplacementPolicy;
use super::optgen::SampledOptimalHistory;
use super::predictor::ReusePredictor;
use crate::common::{ConfigError, IndexHash, LineId, MemAccess, MixHash};
use crate::config::HawkeyeConfig;
use crate::stats::PolicyStats;

/// Hawkeye policy state.
#[derive(Clone, Debug)]
pub struct HawkeyePolicy<H = MixHash> {
    /// RRIP age per physical line.
    ages: Vec<u8>,
    /// Line address currently resident in each physical line.
    resident: Vec<Option<u64>>,
    /// Age ceiling and eviction sentinel.
    age_max: u8,
    predictor: ReusePredictor<H>,
    optgen: SampledOptimalHistory<H>,
    stats: PolicyStats,
}

impl HawkeyePolicy<MixHash> {
    /// Creates a Hawkeye policy using the default hash.
    ///
    /// # Arguments
    ///
    /// * `ways` - Associativity of the host cache.
    /// * `num_lines` - Total number of physical lines in the host cache.
    /// * `config` - Sampler, predictor, and RRIP parameters.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any parameter fails validation.
    pub fn new(ways: usize, num_lines: usize, config: &HawkeyeConfig) -> Result<Self, ConfigError> {
        Self::with_hasher(ways, num_lines, config, MixHash)
    }
}

impl<H: IndexHash + Clone> HawkeyePolicy<H> {
    /// Creates a Hawkeye policy with an injected hash family.
    ///
    /// The same hash serves the sampler and the predictor under different seeds.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any parameter fails validation.
    pub fn with_hasher(
        ways: usize,
        num_lines: usize,
        config: &HawkeyeConfig,
        hasher: H,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if ways == 0 {
            return Err(ConfigError::ZeroWays);
        }
        if num_lines == 0 {
            return Err(ConfigError::NoLines);
        }
        let optgen = SampledOptimalHistory::new(
            config.sample_sets,
            ways,
            config.history_factor,
            hasher.clone(),
        )?;
        let predictor =
            ReusePredictor::new(config.predictor_index_bits, config.counter_max, hasher)?;

        tracing::debug!(
            ways,
            num_lines,
            sample_sets = config.sample_sets,
            history = optgen.set_len(),
            predictor_entries = predictor.len(),
            "hawkeye policy constructed"
        );

        Ok(Self {
            ages: vec![config.age_max; num_lines],
            resident: vec![None; num_lines],
            age_max: config.age_max,
            predictor,
            optgen,
            stats: PolicyStats::default(),
        })
    }
}

impl<H> HawkeyePolicy<H> {
    /// RRIP age of `line`.
    ///
    /// # Panics
    ///
    /// Panics if `line` is outside the line array.
    pub fn age(&self, line: LineId) -> u8 {
        self.ages[line]
    }

    /// All RRIP ages, indexed by line id.
    pub fn ages(&self) -> &[u8] {
        &self.ages
    }

    /// Age ceiling and eviction sentinel.
    pub const fn age_max(&self) -> u8 {
        self.age_max
    }

    /// Line address recorded as resident in `line`.
    ///
    /// # Panics
    ///
    /// Panics if `line` is outside the line array.
    pub fn resident(&self, line: LineId) -> Option<u64> {
        self.resident[line]
    }

    /// The reuse predictor.
    pub const fn predictor(&self) -> &ReusePredictor<H> {
        &self.predictor
    }

    /// The OPTgen sampler.
    pub const fn optgen(&self) -> &SampledOptimalHistory<H> {
        &self.optgen
    }

    /// Counters accumulated so far.
    pub const fn stats(&self) -> &PolicyStats {
        &self.stats
    }
}

impl<H: IndexHash> ReplacementPolicy for HawkeyePolicy<H> {
    /// Replays the access through OPTgen, trains the predictor, and ages the line.
    ///
    /// The line is set to age 0 if the accessing PC is predicted friendly and
    /// to the maximum age otherwise, even though it was just referenced.
    fn update(&mut self, line: LineId, access: &MemAccess) {
        let prediction = self.optgen.predict(access.line_addr, access.pc);
        self.stats.record_verdict(prediction.verdict);
        if let Some(last_pc) = prediction.last_pc {
            self.predictor.train(last_pc, prediction.verdict);
        }

        if self.predictor.is_friendly(access.pc) {
            self.stats.friendly_updates += 1;
            self.ages[line] = 0;
        } else {
            self.stats.averse_updates += 1;
            self.ages[line] = self.age_max;
        }
        self.resident[line] = Some(access.line_addr);
    }

    /// Picks the oldest candidate, aging the rest on friendly insertions.
    ///
    /// The scan stops at the first candidate holding the sentinel age. If the
    /// victim was younger than the sentinel, the PC that inserted it is
    /// detrained. The incoming line is recorded as resident in the victim.
    ///
    /// # Panics
    ///
    /// Panics if `candidates` is empty or names a line outside the line array.
    fn rank<C>(&mut self, access: &MemAccess, candidates: C) -> LineId
    where
        C: IntoIterator<Item = LineId>,
        C::IntoIter: Clone,
    {
        let candidates = candidates.into_iter();

        let mut victim = None;
        let mut victim_age = 0;
        for line in candidates.clone() {
            let age = self.ages[line];
            if victim.is_none() || age > victim_age {
                victim = Some(line);
                victim_age = age;
            }
            if age >= self.age_max {
                break;
            }
        }
        let Some(victim) = victim else {
            panic!("hawkeye: rank called with an empty candidate set");
        };

        if self.predictor.is_friendly(access.pc) {
            let ceiling = self.age_max - 1;
            for line in candidates {
                if line != victim && self.ages[line] < ceiling {
                    self.ages[line] += 1;
                }
            }
        }

        if victim_age < self.age_max {
            let inserting_pc = self.resident[victim]
                .and_then(|addr| self.optgen.find_last_pc(addr));
            if let Some(pc) = inserting_pc {
                self.predictor.detrain(pc);
                self.stats.detrains += 1;
                tracing::trace!(victim, pc, "hawkeye detrain");
            }
        } else {
            self.stats.sentinel_victims += 1;
        }

        tracing::trace!(victim, age = victim_age, "hawkeye victim");
        self.resident[victim] = Some(access.line_addr);
        victim
    }
}
