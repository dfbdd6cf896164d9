//! Set-Associative Cache Host Model.
//!
//! A minimal cache that exists to drive replacement policies the way an
//! enclosing memory-hierarchy simulator would. It models tags and validity
//! only: no data, no dirty state, no latency. Line ids are laid out set-major,
//! so the candidates for set `s` are `s * ways .. (s + 1) * ways`.
//!
//! Invalid ways are filled in order before the policy is consulted, so a
//! policy only ranks full sets.

/// Cache replacement policy implementations (Hawkeye, SRRIP).
pub mod policies;

use std::ops::Range;

use self::policies::{Policy, ReplacementPolicy};
use crate::common::{ConfigError, LineId, MemAccess};
use crate::config::CacheConfig;
use crate::stats::CacheStats;

/// Cache line entry containing tag and validity.
#[derive(Clone, Copy, Debug, Default)]
struct CacheLine {
    /// Full line address; sets are small enough that storing it whole is simpler than splitting.
    tag: u64,
    valid: bool,
}

/// Cache simulator implementing a set-associative cache with a configurable policy.
#[derive(Clone, Debug)]
pub struct CacheSim {
    lines: Vec<CacheLine>,
    num_sets: usize,
    ways: usize,
    line_bytes: usize,
    policy: Policy,
    stats: CacheStats,
}

impl CacheSim {
    /// Creates a new cache simulator with the specified configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Cache configuration specifying size, associativity,
    ///   line size, and replacement policy
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the geometry or policy parameters are invalid.
    pub fn new(config: &CacheConfig) -> Result<Self, ConfigError> {
        let policy = Policy::new(config)?;
        let num_lines = config.num_lines();
        tracing::debug!(
            size_bytes = config.size_bytes,
            line_bytes = config.line_bytes,
            ways = config.ways,
            sets = config.num_sets(),
            policy = ?config.policy,
            "cache constructed"
        );
        Ok(Self {
            lines: vec![CacheLine::default(); num_lines],
            num_sets: config.num_sets(),
            ways: config.ways,
            line_bytes: config.line_bytes,
            policy,
            stats: CacheStats::default(),
        })
    }

    /// Line ids belonging to the set that holds `line_addr`.
    fn candidates(&self, line_addr: u64) -> Range<LineId> {
        let set = (line_addr % self.num_sets as u64) as usize;
        let base = set * self.ways;
        base..base + self.ways
    }

    /// Line address containing byte address `addr`.
    #[inline]
    pub const fn line_addr(&self, addr: u64) -> u64 {
        addr / self.line_bytes as u64
    }

    /// Checks if the cache holds the line containing byte address `addr`.
    pub fn contains(&self, addr: u64) -> bool {
        self.lookup(self.line_addr(addr)).is_some()
    }

    /// Physical line holding `line_addr`, if resident.
    fn lookup(&self, line_addr: u64) -> Option<LineId> {
        self.candidates(line_addr)
            .find(|&id| self.lines[id].valid && self.lines[id].tag == line_addr)
    }

    /// Accesses byte address `addr` on behalf of instruction `pc`.
    ///
    /// # Returns
    ///
    /// `true` on a hit, `false` if the line had to be filled.
    pub fn access(&mut self, addr: u64, pc: u64) -> bool {
        let access = MemAccess::new(self.line_addr(addr), pc);
        self.access_line(&access)
    }

    /// Accesses a pre-computed line address.
    ///
    /// A hit calls `update` on the resident line. A miss fills the first
    /// invalid way of the set, or asks the policy to rank the set when every
    /// way is valid. Either way the policy is notified via `replaced`, the
    /// tag is installed, and `update` is called on the filled line.
    ///
    /// # Panics
    ///
    /// Panics if the policy returns a line outside the accessed set.
    pub fn access_line(&mut self, access: &MemAccess) -> bool {
        self.stats.accesses += 1;

        if let Some(line) = self.lookup(access.line_addr) {
            self.stats.hits += 1;
            self.policy.update(line, access);
            return true;
        }

        self.stats.misses += 1;
        let set = self.candidates(access.line_addr);
        let victim = match set.clone().find(|&id| !self.lines[id].valid) {
            Some(free) => free,
            None => {
                let victim = self.policy.rank(access, set.clone());
                assert!(
                    set.contains(&victim),
                    "policy chose line {victim} outside candidate set {set:?}"
                );
                victim
            }
        };
        if self.lines[victim].valid {
            self.stats.evictions += 1;
        }
        self.policy.replaced(victim);
        self.lines[victim] = CacheLine {
            tag: access.line_addr,
            valid: true,
        };
        self.policy.update(victim, access);
        false
    }

    /// Invalidates every line. Policy state (ages, predictor, history) persists.
    pub fn flush(&mut self) {
        for line in &mut self.lines {
            line.valid = false;
        }
    }

    /// Counters accumulated so far.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// The replacement policy.
    pub const fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Number of sets.
    pub const fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// Associativity.
    pub const fn ways(&self) -> usize {
        self.ways
    }
}
