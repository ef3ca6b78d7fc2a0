//! HMAC-SHA-1 with a precomputed pad pair.
//!
//! PBKDF2 applies the PRF thousands of times with one fixed key, so the
//! inner and outer pad blocks are derived once at construction and reused
//! read-only for every message. Pads are key material and are zeroized on
//! drop.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::sha1::{DIGEST_BITS, sha1, sha1_words};
use crate::types::KdfError;
use crate::words::bytes_to_words;

/// HMAC block size in bytes (one SHA-1 input block).
const BLOCK_LEN: usize = 64;

/// Bit length of one pad block.
const BLOCK_BITS: u64 = 512;

/// Keyed HMAC-SHA-1 instance.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct HmacSha1 {
    inner_pad: [u32; 16],
    outer_pad: [u32; 16],
}

impl HmacSha1 {
    /// Derive the pad pair from `key`.
    ///
    /// Keys longer than 64 bytes are replaced by their SHA-1 digest first;
    /// shorter keys are implicitly zero-padded to the block size before the
    /// 0x36/0x5c XOR.
    pub fn new(key: &[u8]) -> Result<Self, KdfError> {
        let key_words = if key.len() > BLOCK_LEN {
            sha1(key)?.to_vec()
        } else {
            bytes_to_words(key)
        };

        let mut inner_pad = [0x36363636u32; 16];
        let mut outer_pad = [0x5c5c5c5cu32; 16];
        for (i, &w) in key_words.iter().enumerate() {
            inner_pad[i] ^= w;
            outer_pad[i] ^= w;
        }
        Ok(Self { inner_pad, outer_pad })
    }

    /// `SHA1(outer_pad || SHA1(inner_pad || message))` over a message of
    /// `message_bits` meaningful bits.
    pub fn compute(&self, message: &[u32], message_bits: u64) -> Result<[u32; 5], KdfError> {
        let mut inner_input = Vec::with_capacity(16 + message.len());
        inner_input.extend_from_slice(&self.inner_pad);
        inner_input.extend_from_slice(message);
        let inner = sha1_words(inner_input, BLOCK_BITS + message_bits)?;

        let mut outer_input = Vec::with_capacity(16 + 5);
        outer_input.extend_from_slice(&self.outer_pad);
        outer_input.extend_from_slice(&inner);
        sha1_words(outer_input, BLOCK_BITS + DIGEST_BITS)
    }

    /// Convenience: HMAC of a byte-string message.
    pub fn compute_bytes(&self, message: &[u8]) -> Result<[u32; 5], KdfError> {
        self.compute(&bytes_to_words(message), 8 * message.len() as u64)
    }
}
