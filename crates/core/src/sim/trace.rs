//! Access Trace Loading.
//!
//! Traces are plain text, one access per line:
//!
//! ```text
//! # addr          pc
//! 0x7ffd1000      0x400a10
//! 4096            0x400a10
//! ```
//!
//! Each token is decimal or `0x`-prefixed hexadecimal. Blank lines and
//! everything after `#` are ignored. Addresses are byte addresses; the cache
//! converts them to line addresses.

use std::fs;
use std::path::Path;

use crate::common::TraceError;

/// One traced memory access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    /// Byte address.
    pub addr: u64,
    /// Program counter of the accessing instruction.
    pub pc: u64,
}

/// Parses a decimal or `0x`-prefixed hexadecimal token.
fn parse_u64(token: &str) -> Option<u64> {
    match token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => token.parse().ok(),
    }
}

/// Parses trace text.
///
/// # Errors
///
/// Returns [`TraceError::Parse`] naming the first malformed line.
pub fn parse(text: &str) -> Result<Vec<TraceRecord>, TraceError> {
    let mut records = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        let err = |reason: String| TraceError::Parse {
            line: idx + 1,
            reason,
        };

        let mut tokens = line.split_whitespace();
        let (Some(addr), Some(pc), None) = (tokens.next(), tokens.next(), tokens.next()) else {
            return Err(err(format!("expected `<addr> <pc>`, found `{line}`")));
        };
        let addr = parse_u64(addr).ok_or_else(|| err(format!("invalid address `{addr}`")))?;
        let pc = parse_u64(pc).ok_or_else(|| err(format!("invalid pc `{pc}`")))?;
        records.push(TraceRecord { addr, pc });
    }
    Ok(records)
}

/// Reads and parses a trace file.
///
/// # Errors
///
/// Returns [`TraceError::Io`] if the file cannot be read, or
/// [`TraceError::Parse`] for malformed content.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<TraceRecord>, TraceError> {
    let text = fs::read_to_string(path)?;
    parse(&text)
}
