//! Static RRIP (SRRIP) Replacement Policy.
//!
//! The baseline Hawkeye is compared against. Every line carries a re-reference
//! age; the line with the largest age is evicted. New lines are inserted with
//! a "long" predicted re-reference (`age_max - 1`) and promoted to 0 on a hit,
//! so a scan of never-reused lines cannot flush lines that are being reused.
//!
//! If no candidate is at the maximum age, all candidates are aged by exactly
//! the deficit that brings the oldest one up to it. This is the closed form
//! of the usual "increment everything and retry" loop.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `update()`: O(1)
//!   - `rank()`: O(W) where W is the number of candidates
//! - **Space Complexity:** O(N) for N lines
//! - **Hardware Cost:** Low - M bits per line
//! - **Best Case:** Mixed workloads with a reused working set and streaming scans
//! - **Worst Case:** Thrashing working sets slightly larger than the cache

use super::ReplacementPolicy;
use crate::common::{ConfigError, LineId, MemAccess};
use crate::config::RripConfig;

/// SRRIP policy state.
#[derive(Clone, Debug)]
pub struct SrripPolicy {
    /// Re-reference age per line.
    ages: Vec<u8>,
    /// Set between `replaced` and the following `update` for a freshly filled line.
    filling: Vec<bool>,
    age_max: u8,
}

impl SrripPolicy {
    /// Creates an SRRIP policy with every line at the maximum age.
    ///
    /// # Arguments
    ///
    /// * `num_lines` - Total number of physical lines in the host cache.
    /// * `config` - RRIP parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::AgeMax`] or [`ConfigError::NoLines`].
    pub fn new(num_lines: usize, config: &RripConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        if num_lines == 0 {
            return Err(ConfigError::NoLines);
        }
        Ok(Self {
            ages: vec![config.age_max; num_lines],
            filling: vec![false; num_lines],
            age_max: config.age_max,
        })
    }

    /// Re-reference age of `line`.
    ///
    /// # Panics
    ///
    /// Panics if `line` is outside the line array.
    pub fn age(&self, line: LineId) -> u8 {
        self.ages[line]
    }

    /// All ages, indexed by line id.
    pub fn ages(&self) -> &[u8] {
        &self.ages
    }

    /// Age ceiling.
    pub const fn age_max(&self) -> u8 {
        self.age_max
    }
}

impl ReplacementPolicy for SrripPolicy {
    /// Promotes a hit to age 0; a fresh fill is inserted at `age_max - 1`.
    fn update(&mut self, line: LineId, _access: &MemAccess) {
        if self.filling[line] {
            self.filling[line] = false;
            self.ages[line] = self.age_max - 1;
        } else {
            self.ages[line] = 0;
        }
    }

    /// Marks `line` as refilled so the next `update` uses the insertion age.
    fn replaced(&mut self, line: LineId) {
        self.filling[line] = true;
    }

    /// Returns the first candidate at the maximum age, aging the set if needed.
    ///
    /// # Panics
    ///
    /// Panics if `candidates` is empty or names a line outside the line array.
    fn rank<C>(&mut self, _access: &MemAccess, candidates: C) -> LineId
    where
        C: IntoIterator<Item = LineId>,
        C::IntoIter: Clone,
    {
        let candidates = candidates.into_iter();

        let mut victim = None;
        let mut victim_age = 0;
        for line in candidates.clone() {
            let age = self.ages[line];
            if age >= self.age_max {
                return line;
            }
            if victim.is_none() || age > victim_age {
                victim = Some(line);
                victim_age = age;
            }
        }
        let Some(victim) = victim else {
            panic!("srrip: rank called with an empty candidate set");
        };

        let deficit = self.age_max - victim_age;
        for line in candidates {
            self.ages[line] = self.ages[line].saturating_add(deficit).min(self.age_max);
        }
        victim
    }
}
