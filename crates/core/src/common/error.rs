//! Error definitions.
//!
//! The policy core is deterministic and performs no I/O, so its error surface
//! is small:
//! 1. **Configuration errors:** Rejected at construction; no policy or cache
//!    is ever built from an invalid configuration.
//! 2. **Trace errors:** Reading or parsing an access trace for replay.
//!
//! Contract violations by the host (an empty candidate set, a line id past
//! the end of the line array) are not represented here. They panic.

use thiserror::Error;

/// Invalid policy or cache configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The OPTgen sample-set count must be a non-zero power of two.
    #[error("sample set count {0} is not a power of two")]
    SampleSetsNotPowerOfTwo(usize),

    /// The cache must have at least one way.
    #[error("associativity must be at least 1")]
    ZeroWays,

    /// A policy must manage at least one physical line.
    #[error("cache must have at least one line")]
    NoLines,

    /// The cache line size must be non-zero.
    #[error("line size must be non-zero")]
    ZeroLineBytes,

    /// Capacity, line size, and associativity do not describe whole sets.
    #[error("{size_bytes} bytes of {line_bytes}-byte lines cannot be split into {ways}-way sets")]
    InvalidGeometry {
        /// Total capacity in bytes.
        size_bytes: usize,
        /// Line size in bytes.
        line_bytes: usize,
        /// Associativity.
        ways: usize,
    },

    /// The predictor table index width is outside the supported range.
    #[error("predictor index width {0} is outside 1..=24 bits")]
    PredictorIndexBits(u32),

    /// The predictor counter ceiling must be at least 1.
    #[error("predictor counter maximum {0} must be at least 1")]
    CounterMax(u8),

    /// RRIP needs an eviction sentinel and a distinct aged value below it.
    #[error("RRIP maximum age {0} must be at least 2")]
    AgeMax(u8),

    /// The sampler history must cover at least one access per way.
    #[error("history factor must be at least 1")]
    HistoryFactor,

    /// The configuration document could not be parsed.
    #[error("invalid configuration document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure while loading an access trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The trace file could not be read.
    #[error("could not read trace: {0}")]
    Io(#[from] std::io::Error),

    /// A trace line is malformed.
    #[error("line {line}: {reason}")]
    Parse {
        /// One-based line number within the trace.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },
}
