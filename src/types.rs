//! Core types and enums for keystretch.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of HMAC iterations executed per scheduling chunk.
pub const DEFAULT_CHUNK_SIZE: u32 = 10;

/// Casing for hex-encoded output.
///
/// Default is `Lower`. The case is an explicit parameter wherever hex is
/// produced; there is no process-global format state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum HexCase {
    /// Lowercase hex digits (`0-9a-f`). Default.
    #[default]
    Lower,
    /// Uppercase hex digits (`0-9A-F`)
    Upper,
}

/// Tunable derivation parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeriveParams {
    /// PBKDF2 iteration count. Must be at least 1.
    pub iterations: u32,
    /// Derived key length in bytes. Must be at least 1.
    pub key_len: usize,
}

impl Default for DeriveParams {
    fn default() -> Self {
        // Hardened default iteration count for interactive use (2024+ guidance).
        Self {
            iterations: 600_000,
            key_len: 20,
        }
    }
}

/// Library error type (no panics for expected failures).
#[derive(Error, Debug)]
pub enum KdfError {
    #[error("invalid argument: {0}")]
    InvalidParameter(&'static str),
    #[error("message exceeds 2^32 - 1 bits")]
    MessageTooLong,
    #[error("random generator failure")]
    Rng,
}
