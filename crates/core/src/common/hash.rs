//! Index Hashing.
//!
//! Both the OPTgen sampler (address -> sample set) and the reuse predictor
//! (PC -> counter) map a 64-bit key onto a small power-of-two table. The hash
//! family is injected so the policies carry no dependency on a particular
//! hashing implementation. Each user passes its own seed, so one hash value
//! can serve both tables.
//!
//! # Implementations
//!
//! - `MixHash`: seeded 64-bit avalanche mixer. The default.
//! - `IdentityHash`: truncates the key and ignores the seed. Indexing then
//!   degenerates to `key & mask`, which keeps table positions predictable in
//!   tests and matches the plain modulo indexing of simple hardware.
//! - Any `Fn(u32, u64) -> u32` closure, boxed or not.

/// A seeded hash family mapping 64-bit keys to 32-bit values.
///
/// Callers mask the result down to their table size, so implementations
/// should spread entropy into the low bits.
pub trait IndexHash {
    /// Hashes `key` under the hash function selected by `seed`.
    fn hash(&self, seed: u32, key: u64) -> u32;
}

impl<F> IndexHash for F
where
    F: Fn(u32, u64) -> u32,
{
    #[inline]
    fn hash(&self, seed: u32, key: u64) -> u32 {
        self(seed, key)
    }
}

/// Seeded avalanche hash (SplitMix64 finalizer over `key ^ seed`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MixHash;

impl IndexHash for MixHash {
    #[inline]
    fn hash(&self, seed: u32, key: u64) -> u32 {
        let mut z = key ^ (u64::from(seed)).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        (z ^ (z >> 32)) as u32
    }
}

/// Identity "hash": returns the low 32 bits of the key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IdentityHash;

impl IndexHash for IdentityHash {
    #[inline(always)]
    fn hash(&self, _seed: u32, key: u64) -> u32 {
        key as u32
    }
}
