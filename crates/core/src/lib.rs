//! Hawkeye cache replacement library.
//!
//! This crate implements the Hawkeye replacement policy for set-associative caches:
//! 1. **OPTgen:** Bounded-history emulation of Belady's MIN producing hit/miss verdicts.
//! 2. **Predictor:** PC-indexed saturating counters trained on those verdicts.
//! 3. **Policy:** RRIP ages steered by the predictor, with detraining on eviction.
//! 4. **Baseline:** Static RRIP for comparison.
//! 5. **Simulation:** A host cache model, trace loading, replay, and statistics.

/// Cache host model and replacement policies.
pub mod cache;
/// Common types (access descriptor, line ids, hashing, errors).
pub mod common;
/// Policy and cache configuration (defaults, validation, JSON).
pub mod config;
/// Trace loading and replay.
pub mod sim;
/// Cache and policy statistics.
pub mod stats;

/// Host cache model; construct with `CacheSim::new`.
pub use crate::cache::CacheSim;
/// Replacement policy trait and the static-dispatch wrapper.
pub use crate::cache::policies::{HawkeyePolicy, Policy, ReplacementPolicy, SrripPolicy};
/// Access descriptor passed to every policy hook.
pub use crate::common::MemAccess;
/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
