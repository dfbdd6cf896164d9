//! OPTgen: Sampled Optimal Replacement History.
//!
//! Belady's MIN evicts the line whose next use lies furthest in the future,
//! which no online policy can know. OPTgen recovers MIN's verdict after the
//! fact: when a line is reused, it can decide whether MIN would have kept the
//! line resident across the whole reuse interval.
//!
//! Each sampled set keeps a bounded, oldest-to-newest history of recent
//! accesses. Every slot carries an occupancy count: the number of reuse
//! intervals MIN has already chosen to keep cached across that point in time.
//! A reuse is a MIN hit if no slot inside its interval is already at the
//! associativity limit, in which case the interval is claimed by bumping the
//! occupancy of the slots it spans.
//!
//! # Approximation
//!
//! History is capped at `history_factor x ways` slots per set. When a set is
//! full the oldest slot is dropped, so reuses longer than the window read as
//! first accesses. Only a power-of-two number of sets is sampled; addresses
//! map onto them through the injected hash.
//!
//! # Performance
//!
//! - **Time Complexity:** `predict()` and `find_last_pc()` are O(L) where L is the history length
//! - **Space Complexity:** O(S x L) slots, allocated once at construction

use std::collections::VecDeque;

use crate::common::{ConfigError, IndexHash, MixHash};

/// Hash seed for the address-to-sample-set mapping.
const SAMPLE_SET_SEED: u32 = 0x0C0F_FEE5;

/// MIN's judgement of one access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// The previous occurrence would still have been cached under MIN.
    Hit,
    /// MIN would have evicted (or bypassed) the line before this reuse.
    Miss,
    /// No previous occurrence within the sampled history.
    FirstAccess,
}

/// Result of [`SampledOptimalHistory::predict`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Prediction {
    /// MIN's verdict for this access.
    pub verdict: Verdict,
    /// PC that inserted the previous occurrence; `None` on a first access.
    pub last_pc: Option<u64>,
}

/// One slot of sampled history.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SampleEntry {
    /// Line address of the recorded access.
    pub addr: u64,
    /// PC that made the recorded access.
    pub pc: u64,
    /// Reuse intervals MIN keeps cached across this slot.
    pub occupancy: u32,
}

/// Per-set bounded access history emulating Belady's MIN.
#[derive(Clone, Debug)]
pub struct SampledOptimalHistory<H = MixHash> {
    /// One oldest-to-newest history per sampled set.
    sets: Vec<VecDeque<SampleEntry>>,
    /// History capacity per set.
    set_len: usize,
    /// Associativity of the cache being emulated.
    ways: u32,
    /// `sample_sets - 1`.
    set_mask: usize,
    hasher: H,
}

impl<H: IndexHash> SampledOptimalHistory<H> {
    /// Creates an empty sampler.
    ///
    /// # Arguments
    ///
    /// * `sample_sets` - Number of sampled sets; must be a power of two.
    /// * `ways` - Associativity of the cache whose MIN behavior is emulated.
    /// * `history_factor` - History slots per set, as a multiple of `ways`.
    /// * `hasher` - Hash used to map line addresses to sampled sets.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SampleSetsNotPowerOfTwo`], [`ConfigError::ZeroWays`],
    /// or [`ConfigError::HistoryFactor`] for an unusable geometry.
    pub fn new(
        sample_sets: usize,
        ways: usize,
        history_factor: usize,
        hasher: H,
    ) -> Result<Self, ConfigError> {
        if !sample_sets.is_power_of_two() {
            return Err(ConfigError::SampleSetsNotPowerOfTwo(sample_sets));
        }
        if ways == 0 {
            return Err(ConfigError::ZeroWays);
        }
        if history_factor == 0 {
            return Err(ConfigError::HistoryFactor);
        }
        let set_len = history_factor * ways;
        Ok(Self {
            sets: (0..sample_sets)
                .map(|_| VecDeque::with_capacity(set_len))
                .collect(),
            set_len,
            ways: ways as u32,
            set_mask: sample_sets - 1,
            hasher,
        })
    }

    /// History capacity of each sampled set.
    pub const fn set_len(&self) -> usize {
        self.set_len
    }

    /// Number of sampled sets.
    pub fn num_sets(&self) -> usize {
        self.sets.len()
    }

    /// Sampled set that tracks `addr`.
    #[inline]
    pub fn set_index(&self, addr: u64) -> usize {
        self.hasher.hash(SAMPLE_SET_SEED, addr) as usize & self.set_mask
    }

    /// History of one sampled set, oldest first.
    ///
    /// # Panics
    ///
    /// Panics if `set` is not below [`Self::num_sets`].
    pub fn history(&self, set: usize) -> impl Iterator<Item = SampleEntry> + '_ {
        self.sets[set].iter().copied()
    }

    /// Records an access and returns MIN's verdict for it.
    ///
    /// The history is scanned newest-first for the previous occurrence of
    /// `addr`. If any slot from the newest back to (and including) that
    /// occurrence already holds `ways` live intervals, MIN could not have
    /// kept the line: a miss. Otherwise the reuse is a hit and every slot
    /// after the occurrence gains one unit of occupancy. The access is then
    /// appended, dropping the oldest slot if the set is full.
    pub fn predict(&mut self, addr: u64, pc: u64) -> Prediction {
        let set_idx = self.set_index(addr);
        let ways = self.ways;
        let history = &mut self.sets[set_idx];

        let mut saturated = false;
        let mut previous = None;
        for (pos, slot) in history.iter().enumerate().rev() {
            if slot.occupancy >= ways {
                saturated = true;
            }
            if slot.addr == addr {
                previous = Some(pos);
                break;
            }
        }

        let prediction = match previous {
            None => Prediction {
                verdict: Verdict::FirstAccess,
                last_pc: None,
            },
            Some(pos) => {
                let last_pc = Some(history[pos].pc);
                if saturated {
                    Prediction {
                        verdict: Verdict::Miss,
                        last_pc,
                    }
                } else {
                    for slot in history.range_mut(pos + 1..) {
                        slot.occupancy += 1;
                    }
                    Prediction {
                        verdict: Verdict::Hit,
                        last_pc,
                    }
                }
            }
        };

        if history.len() == self.set_len {
            let _ = history.pop_front();
        }
        history.push_back(SampleEntry {
            addr,
            pc,
            occupancy: 0,
        });

        tracing::trace!(addr, pc, set = set_idx, verdict = ?prediction.verdict, "optgen verdict");
        prediction
    }

    /// PC that inserted the newest sampled occurrence of `addr`, if any.
    pub fn find_last_pc(&self, addr: u64) -> Option<u64> {
        self.sets[self.set_index(addr)]
            .iter()
            .rev()
            .find(|slot| slot.addr == addr)
            .map(|slot| slot.pc)
    }
}
