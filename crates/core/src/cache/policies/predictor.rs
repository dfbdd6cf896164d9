//! Reuse Predictor.
//!
//! A table of saturating counters indexed by a hash of the program counter.
//! Each counter learns whether lines inserted by that instruction tend to be
//! reused before MIN would evict them. Training is driven by OPTgen verdicts
//! for the PC that *inserted* the previous occurrence of a line, not the PC
//! re-referencing it.
//!
//! Counters above half of the ceiling classify a PC as cache-friendly.
//!
//! # Performance
//!
//! - **Time Complexity:** O(1) per lookup or update
//! - **Space Complexity:** `2^index_bits` bytes

use crate::cache::policies::optgen::Verdict;
use crate::common::{ConfigError, IndexHash, MixHash};

/// Hash seed for PC-to-counter indexing.
const PREDICTOR_SEED: u32 = 0x5EED_0BC7;

/// Widest supported index.
const MAX_INDEX_BITS: u32 = 24;

/// PC-indexed saturating-counter table.
#[derive(Clone, Debug)]
pub struct ReusePredictor<H = MixHash> {
    counters: Vec<u8>,
    mask: usize,
    counter_max: u8,
    /// Counters strictly above this value are friendly.
    threshold: u8,
    hasher: H,
}

impl<H: IndexHash> ReusePredictor<H> {
    /// Creates a predictor with every counter at zero (cache-averse).
    ///
    /// # Arguments
    ///
    /// * `index_bits` - log2 of the table size.
    /// * `counter_max` - Saturation ceiling of each counter.
    /// * `hasher` - Hash used to map PCs to table slots.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::PredictorIndexBits`] for an index width outside
    /// `1..=24`, or [`ConfigError::CounterMax`] for a zero ceiling.
    pub fn new(index_bits: u32, counter_max: u8, hasher: H) -> Result<Self, ConfigError> {
        if index_bits == 0 || index_bits > MAX_INDEX_BITS {
            return Err(ConfigError::PredictorIndexBits(index_bits));
        }
        if counter_max == 0 {
            return Err(ConfigError::CounterMax(counter_max));
        }
        let len = 1usize << index_bits;
        Ok(Self {
            counters: vec![0; len],
            mask: len - 1,
            counter_max,
            threshold: counter_max / 2,
            hasher,
        })
    }

    /// Table slot used for `pc`.
    #[inline]
    pub fn index(&self, pc: u64) -> usize {
        self.hasher.hash(PREDICTOR_SEED, pc) as usize & self.mask
    }

    /// Current counter value for `pc`.
    pub fn counter(&self, pc: u64) -> u8 {
        self.counters[self.index(pc)]
    }

    /// Counter ceiling.
    pub const fn counter_max(&self) -> u8 {
        self.counter_max
    }

    /// Number of counters in the table.
    pub fn len(&self) -> usize {
        self.counters.len()
    }

    /// Always false; the table holds at least two counters.
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    /// Whether lines inserted by `pc` are predicted to be reused.
    #[inline]
    pub fn is_friendly(&self, pc: u64) -> bool {
        self.counter(pc) > self.threshold
    }

    /// Trains the counter for `pc` with an OPTgen verdict.
    ///
    /// Hits strengthen, misses weaken, first accesses carry no signal.
    pub fn train(&mut self, pc: u64, verdict: Verdict) {
        match verdict {
            Verdict::Hit => self.reward(pc),
            Verdict::Miss => self.detrain(pc),
            Verdict::FirstAccess => {}
        }
    }

    /// Saturating increment.
    pub fn reward(&mut self, pc: u64) {
        let idx = self.index(pc);
        if self.counters[idx] < self.counter_max {
            self.counters[idx] += 1;
        }
    }

    /// Saturating decrement.
    pub fn detrain(&mut self, pc: u64) {
        let idx = self.index(pc);
        self.counters[idx] = self.counters[idx].saturating_sub(1);
    }
}
