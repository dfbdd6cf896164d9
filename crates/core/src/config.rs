//! Configuration for the replacement policies and the host cache model.
//!
//! This module defines every parameter a policy or cache is constructed from. It provides:
//! 1. **Defaults:** Baseline constants matching the published Hawkeye design (8x history,
//!    3-bit predictor counters, 3-bit RRIP ages, 64 sampled sets).
//! 2. **Structures:** Cache geometry plus per-policy parameter blocks.
//! 3. **Validation:** Construction-time checks; an invalid configuration never builds a policy.
//!
//! Configuration is supplied as JSON (`Config::from_json`) or taken from `Config::default()`.

use serde::Deserialize;

use crate::common::ConfigError;

/// Default configuration constants.
mod defaults {
    /// Default cache capacity (32 KiB).
    pub const CACHE_SIZE: usize = 32 * 1024;

    /// Default cache line size in bytes.
    pub const CACHE_LINE: usize = 64;

    /// Default associativity.
    pub const CACHE_WAYS: usize = 8;

    /// Number of sets tracked by the OPTgen sampler.
    pub const SAMPLE_SETS: usize = 64;

    /// Sampler history length per set, in multiples of the associativity.
    ///
    /// Eight times the associativity is enough history to see most reuses a
    /// real cache of that associativity could exploit.
    pub const HISTORY_FACTOR: usize = 8;

    /// Predictor table index width (2048 counters).
    pub const PREDICTOR_INDEX_BITS: u32 = 11;

    /// Predictor counter ceiling (3-bit saturating counters).
    pub const COUNTER_MAX: u8 = 7;

    /// Hawkeye RRIP ceiling (3-bit ages).
    pub const HAWKEYE_AGE_MAX: u8 = 7;

    /// Static RRIP ceiling (2-bit ages).
    pub const RRIP_AGE_MAX: u8 = 3;

    /// Widest supported predictor index.
    pub const MAX_PREDICTOR_INDEX_BITS: u32 = 24;
}

/// Cache replacement policy algorithms.
///
/// Specifies the algorithm used to select which cache line to evict
/// when a new line must be installed in a full cache set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReplacementPolicy {
    /// Hawkeye: OPTgen-trained PC predictor steering RRIP ages.
    #[default]
    #[serde(alias = "Hawkeye", alias = "hawkeye")]
    Hawkeye,
    /// Static RRIP baseline without prediction.
    #[serde(alias = "Srrip", alias = "srrip")]
    Srrip,
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use hawkeye_core::config::{Config, ReplacementPolicy};
///
/// let json = r#"{
///     "cache": {
///         "size_bytes": 16384,
///         "ways": 4,
///         "policy": "Srrip",
///         "rrip": { "age_max": 7 }
///     }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.cache.ways, 4);
/// assert_eq!(config.cache.line_bytes, 64);
/// assert_eq!(config.cache.policy, ReplacementPolicy::Srrip);
/// assert_eq!(config.cache.rrip.age_max, 7);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Cache geometry and policy selection
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Config {
    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed documents and the
    /// corresponding variant for any parameter that fails validation.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates every section.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.cache.validate()
    }
}

/// Set-associative cache geometry plus the policy driving it.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Total cache size in bytes
    #[serde(default = "CacheConfig::default_size")]
    pub size_bytes: usize,

    /// Cache line size in bytes
    #[serde(default = "CacheConfig::default_line")]
    pub line_bytes: usize,

    /// Associativity (number of ways)
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: usize,

    /// Replacement policy
    #[serde(default)]
    pub policy: ReplacementPolicy,

    /// Hawkeye parameters (used when `policy` is Hawkeye)
    #[serde(default)]
    pub hawkeye: HawkeyeConfig,

    /// Static RRIP parameters (used when `policy` is Srrip)
    #[serde(default)]
    pub rrip: RripConfig,
}

impl CacheConfig {
    /// Returns the default cache size in bytes.
    fn default_size() -> usize {
        defaults::CACHE_SIZE
    }

    /// Returns the default cache line size in bytes.
    fn default_line() -> usize {
        defaults::CACHE_LINE
    }

    /// Returns the default cache associativity (number of ways).
    fn default_ways() -> usize {
        defaults::CACHE_WAYS
    }

    /// Total number of physical lines.
    pub const fn num_lines(&self) -> usize {
        self.size_bytes / self.line_bytes
    }

    /// Number of sets.
    pub const fn num_sets(&self) -> usize {
        self.num_lines() / self.ways
    }

    /// Checks the geometry and the selected policy's parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroWays`], [`ConfigError::ZeroLineBytes`], or
    /// [`ConfigError::InvalidGeometry`] for a bad geometry, otherwise the
    /// result of validating the selected policy's section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ways == 0 {
            return Err(ConfigError::ZeroWays);
        }
        if self.line_bytes == 0 {
            return Err(ConfigError::ZeroLineBytes);
        }
        let lines = self.num_lines();
        if lines == 0 || lines % self.ways != 0 || self.size_bytes % self.line_bytes != 0 {
            return Err(ConfigError::InvalidGeometry {
                size_bytes: self.size_bytes,
                line_bytes: self.line_bytes,
                ways: self.ways,
            });
        }
        match self.policy {
            ReplacementPolicy::Hawkeye => self.hawkeye.validate(),
            ReplacementPolicy::Srrip => self.rrip.validate(),
        }
    }
}

impl Default for CacheConfig {
    /// Creates a default cache configuration.
    ///
    /// 32 KiB, 64-byte lines, 8 ways, Hawkeye replacement.
    fn default() -> Self {
        Self {
            size_bytes: defaults::CACHE_SIZE,
            line_bytes: defaults::CACHE_LINE,
            ways: defaults::CACHE_WAYS,
            policy: ReplacementPolicy::default(),
            hawkeye: HawkeyeConfig::default(),
            rrip: RripConfig::default(),
        }
    }
}

/// Hawkeye policy parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct HawkeyeConfig {
    /// Number of sets tracked by the OPTgen sampler (power of two)
    #[serde(default = "HawkeyeConfig::default_sample_sets")]
    pub sample_sets: usize,

    /// Sampler history per set, as a multiple of the associativity
    #[serde(default = "HawkeyeConfig::default_history_factor")]
    pub history_factor: usize,

    /// Predictor table index width in bits
    #[serde(default = "HawkeyeConfig::default_predictor_index_bits")]
    pub predictor_index_bits: u32,

    /// Predictor counter ceiling
    #[serde(default = "HawkeyeConfig::default_counter_max")]
    pub counter_max: u8,

    /// RRIP age ceiling; also the empty/evict-first sentinel
    #[serde(default = "HawkeyeConfig::default_age_max")]
    pub age_max: u8,
}

impl HawkeyeConfig {
    /// Returns the default sampled set count.
    fn default_sample_sets() -> usize {
        defaults::SAMPLE_SETS
    }

    /// Returns the default history multiplier.
    fn default_history_factor() -> usize {
        defaults::HISTORY_FACTOR
    }

    /// Returns the default predictor index width.
    fn default_predictor_index_bits() -> u32 {
        defaults::PREDICTOR_INDEX_BITS
    }

    /// Returns the default predictor counter ceiling.
    fn default_counter_max() -> u8 {
        defaults::COUNTER_MAX
    }

    /// Returns the default RRIP age ceiling.
    fn default_age_max() -> u8 {
        defaults::HAWKEYE_AGE_MAX
    }

    /// Validates the Hawkeye parameters.
    ///
    /// # Errors
    ///
    /// Returns the variant describing the first invalid parameter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.sample_sets.is_power_of_two() {
            return Err(ConfigError::SampleSetsNotPowerOfTwo(self.sample_sets));
        }
        if self.history_factor == 0 {
            return Err(ConfigError::HistoryFactor);
        }
        if self.predictor_index_bits == 0
            || self.predictor_index_bits > defaults::MAX_PREDICTOR_INDEX_BITS
        {
            return Err(ConfigError::PredictorIndexBits(self.predictor_index_bits));
        }
        if self.counter_max == 0 {
            return Err(ConfigError::CounterMax(self.counter_max));
        }
        if self.age_max < 2 {
            return Err(ConfigError::AgeMax(self.age_max));
        }
        Ok(())
    }
}

impl Default for HawkeyeConfig {
    fn default() -> Self {
        Self {
            sample_sets: defaults::SAMPLE_SETS,
            history_factor: defaults::HISTORY_FACTOR,
            predictor_index_bits: defaults::PREDICTOR_INDEX_BITS,
            counter_max: defaults::COUNTER_MAX,
            age_max: defaults::HAWKEYE_AGE_MAX,
        }
    }
}

/// Static RRIP parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RripConfig {
    /// Age ceiling; lines at this age are evicted first
    #[serde(default = "RripConfig::default_age_max")]
    pub age_max: u8,
}

impl RripConfig {
    /// Returns the default SRRIP age ceiling.
    fn default_age_max() -> u8 {
        defaults::RRIP_AGE_MAX
    }

    /// Validates the SRRIP parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::AgeMax`] if the ceiling leaves no room for a
    /// distinct insertion age.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.age_max < 2 {
            return Err(ConfigError::AgeMax(self.age_max));
        }
        Ok(())
    }
}

impl Default for RripConfig {
    fn default() -> Self {
        Self {
            age_max: defaults::RRIP_AGE_MAX,
        }
    }
}
