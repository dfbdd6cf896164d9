//! Replacement statistics collection and reporting.
//!
//! This module tracks what the policies and the host cache model observed. It provides:
//! 1. **Cache counters:** Accesses, hits, misses, and evictions of valid lines.
//! 2. **Policy counters:** OPTgen verdicts, predictor classifications, and detraining events.
//! 3. **Reporting:** Plain-text tables via `Display` and JSON via `serde`.

use std::fmt;

use serde::Serialize;

use crate::cache::policies::optgen::Verdict;

/// Host cache counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Total accesses presented to the cache.
    pub accesses: u64,
    /// Accesses that found their line resident.
    pub hits: u64,
    /// Accesses that required a fill.
    pub misses: u64,
    /// Fills that displaced a valid line.
    pub evictions: u64,
}

impl CacheStats {
    /// Fraction of accesses that hit, or 0 when nothing was accessed.
    pub fn hit_rate(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            self.hits as f64 / self.accesses as f64
        }
    }

    /// Fraction of accesses that missed, or 0 when nothing was accessed.
    pub fn miss_rate(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            self.misses as f64 / self.accesses as f64
        }
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  cache.accesses         {}", self.accesses)?;
        writeln!(f, "  cache.hits             {}", self.hits)?;
        writeln!(f, "  cache.misses           {}", self.misses)?;
        writeln!(f, "  cache.evictions        {}", self.evictions)?;
        writeln!(f, "  cache.hit_rate         {:.2}%", self.hit_rate() * 100.0)
    }
}

/// Hawkeye policy counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PolicyStats {
    /// OPTgen verdicts that a reuse would have hit under MIN.
    pub opt_hits: u64,
    /// OPTgen verdicts that a reuse would have missed under MIN.
    pub opt_misses: u64,
    /// Accesses with no earlier occurrence in the sampled history.
    pub first_accesses: u64,
    /// Updates where the accessing PC was predicted cache-friendly.
    pub friendly_updates: u64,
    /// Updates where the accessing PC was predicted cache-averse.
    pub averse_updates: u64,
    /// Victims whose inserting PC was found and penalized.
    pub detrains: u64,
    /// Victims that already held the sentinel age.
    pub sentinel_victims: u64,
}

impl PolicyStats {
    /// Counts one OPTgen verdict.
    pub fn record_verdict(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Hit => self.opt_hits += 1,
            Verdict::Miss => self.opt_misses += 1,
            Verdict::FirstAccess => self.first_accesses += 1,
        }
    }

    /// Fraction of reuses OPTgen judged hits, or 0 before any reuse.
    pub fn opt_hit_rate(&self) -> f64 {
        let reuses = self.opt_hits + self.opt_misses;
        if reuses == 0 {
            0.0
        } else {
            self.opt_hits as f64 / reuses as f64
        }
    }
}

impl fmt::Display for PolicyStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  optgen.hits            {}", self.opt_hits)?;
        writeln!(f, "  optgen.misses          {}", self.opt_misses)?;
        writeln!(f, "  optgen.first           {}", self.first_accesses)?;
        writeln!(f, "  optgen.hit_rate        {:.2}%", self.opt_hit_rate() * 100.0)?;
        writeln!(f, "  predictor.friendly     {}", self.friendly_updates)?;
        writeln!(f, "  predictor.averse       {}", self.averse_updates)?;
        writeln!(f, "  predictor.detrains     {}", self.detrains)?;
        writeln!(f, "  rrip.sentinel_victims  {}", self.sentinel_victims)
    }
}
