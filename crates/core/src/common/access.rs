//! Memory Access Descriptor.
//!
//! The policies only need two facts about an access: which cache line it
//! touches and which instruction issued it. The host cache model converts
//! byte addresses to line addresses before building a [`MemAccess`].

/// Index of a physical cache line inside the host cache's line array.
///
/// Line ids are dense: a cache with `N` lines uses ids `0..N`, and the
/// candidates for one set are a contiguous run of `ways` ids.
pub type LineId = usize;

/// A single memory access as seen by a replacement policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MemAccess {
    /// Cache-line address (byte address divided by the line size).
    pub line_addr: u64,
    /// Program counter of the instruction responsible for the access.
    pub pc: u64,
}

impl MemAccess {
    /// Creates a new access descriptor.
    ///
    /// # Arguments
    ///
    /// * `line_addr` - The cache-line address being accessed.
    /// * `pc` - The program counter of the accessing instruction.
    #[inline(always)]
    pub const fn new(line_addr: u64, pc: u64) -> Self {
        Self { line_addr, pc }
    }
}
