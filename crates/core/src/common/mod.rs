//! Common types shared by the policies, the host cache model, and the trace tools.
//!
//! This module provides the small vocabulary every other module speaks:
//! 1. **Access Descriptor:** The line address and instruction PC of one memory access.
//! 2. **Line Ids:** Small integer handles for physical cache lines.
//! 3. **Hashing:** The injected hash capability used for set and predictor indexing.
//! 4. **Error Handling:** Configuration and trace-loading error types.

/// Memory access descriptor and line id type.
pub mod access;

/// Configuration and trace error types.
pub mod error;

/// Injected hash family used for table indexing.
pub mod hash;

pub use access::{LineId, MemAccess};
pub use error::{ConfigError, TraceError};
pub use hash::{IdentityHash, IndexHash, MixHash};
