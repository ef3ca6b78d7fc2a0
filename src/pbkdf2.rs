//! PBKDF2 over HMAC-SHA-1 (RFC 2898 §5.2).
//!
//! Two surfaces: [`derive`]/[`derive_hex`] run a whole derivation in one
//! call, and [`Session`] exposes the same computation as a resumable state
//! machine so a host can interleave other work between bounded chunks of
//! iterations (see [`crate::scheduler`]).
//!
//! The block index in `U_1 = PRF(salt || INT(i))` is the full 8-bit-per-byte
//! big-endian encoding, so derived keys are not limited to 15 blocks.

use zeroize::{Zeroize, Zeroizing};

use crate::hmac::HmacSha1;
use crate::sha1::{DIGEST_BITS, DIGEST_LEN};
use crate::types::{DeriveParams, HexCase, KdfError};
use crate::words::{bytes_to_hex, bytes_to_words, words_to_bytes};

/// Outcome of one [`Session::step`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Progress {
    /// Derivation still in flight; overall percent complete in [0, 100).
    Working(f64),
    /// All blocks complete; the key is available via [`Session::key`].
    Finished,
}

/// A single-use, resumable PBKDF2 derivation.
///
/// Owns all per-derivation state: the precomputed HMAC pad pair, the current
/// block index (1-based), the iteration count within that block, the 5-word
/// XOR accumulator, the previous round's output (next round's message), and
/// the bytes of completed blocks. Iterations within a block are strictly
/// sequential; once finished the session never produces further work.
pub struct Session {
    prf: HmacSha1,
    salt: Zeroizing<Vec<u8>>,
    iterations: u32,
    key_len: usize,
    block_count: u32,
    /// Current block index, 1-based.
    block: u32,
    done_in_block: u32,
    acc: [u32; 5],
    prev: [u32; 5],
    out: Zeroizing<Vec<u8>>,
    finished: bool,
}

impl Session {
    /// Validate parameters and precompute the HMAC pad pair.
    ///
    /// # Errors
    ///
    /// Returns `KdfError::InvalidParameter` when the iteration count or key
    /// length is zero, or when the key length needs more than 2^32 - 1
    /// blocks.
    pub fn new(password: &[u8], salt: &[u8], params: &DeriveParams) -> Result<Self, KdfError> {
        if params.iterations == 0 {
            return Err(KdfError::InvalidParameter("iterations must be > 0"));
        }
        if params.key_len == 0 {
            return Err(KdfError::InvalidParameter("key_len must be > 0"));
        }
        let block_count = (params.key_len as u64).div_ceil(DIGEST_LEN as u64);
        if block_count > u64::from(u32::MAX) {
            return Err(KdfError::InvalidParameter("key_len too large"));
        }

        Ok(Self {
            prf: HmacSha1::new(password)?,
            salt: Zeroizing::new(salt.to_vec()),
            iterations: params.iterations,
            key_len: params.key_len,
            block_count: block_count as u32,
            block: 1,
            done_in_block: 0,
            acc: [0; 5],
            prev: [0; 5],
            out: Zeroizing::new(Vec::with_capacity(params.key_len)),
            finished: false,
        })
    }

    /// Run up to `max_iterations` HMAC rounds, stopping early at a block
    /// boundary.
    ///
    /// Finishing a block appends its (possibly truncated) contribution to
    /// the key and resets the per-block counters. Stepping a finished
    /// session is a no-op that reports `Finished` again.
    pub fn step(&mut self, max_iterations: u32) -> Result<Progress, KdfError> {
        if self.finished {
            return Ok(Progress::Finished);
        }
        for _ in 0..max_iterations.max(1) {
            self.advance_one()?;
            if self.done_in_block == self.iterations {
                self.complete_block();
                if self.finished {
                    return Ok(Progress::Finished);
                }
                break;
            }
        }
        Ok(Progress::Working(self.percent()))
    }

    /// Overall percent complete: `100 * (i - 1 + done/c) / l`.
    pub fn percent(&self) -> f64 {
        if self.finished {
            return 100.0;
        }
        let c = f64::from(self.iterations);
        let l = f64::from(self.block_count);
        100.0 * (f64::from(self.block) - 1.0 + f64::from(self.done_in_block) / c) / l
    }

    /// Final key bytes; empty until the session has finished.
    pub fn key(&self) -> &[u8] {
        if self.finished { &self.out } else { &[] }
    }

    /// Final key as hex; empty until the session has finished.
    pub fn key_hex(&self, case: HexCase) -> String {
        bytes_to_hex(self.key(), case)
    }

    /// Whether the result callback side of the contract may fire.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// One HMAC round: `U_1 = PRF(salt || BE32(block))` on the first round
    /// of a block, `U_k = PRF(U_{k-1})` afterwards, XOR-folded into the
    /// accumulator.
    fn advance_one(&mut self) -> Result<(), KdfError> {
        if self.done_in_block == 0 {
            let mut msg = Vec::with_capacity(self.salt.len() + 4);
            msg.extend_from_slice(&self.salt);
            msg.extend_from_slice(&self.block.to_be_bytes());
            let u = self.prf.compute(&bytes_to_words(&msg), 8 * msg.len() as u64)?;
            self.acc = u;
            self.prev = u;
        } else {
            let u = self.prf.compute(&self.prev, DIGEST_BITS)?;
            for (a, u) in self.acc.iter_mut().zip(u) {
                *a ^= u;
            }
            self.prev = u;
        }
        self.done_in_block += 1;
        Ok(())
    }

    /// Fold the finished block `T_i` into the output, truncating the final
    /// block to the remaining key length.
    fn complete_block(&mut self) {
        let t = words_to_bytes(&self.acc);
        let take = (self.key_len - self.out.len()).min(DIGEST_LEN);
        self.out.extend_from_slice(&t[..take]);
        self.acc = [0; 5];
        self.prev = [0; 5];
        if self.block == self.block_count {
            self.finished = true;
        } else {
            self.block += 1;
            self.done_in_block = 0;
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        // The pad pair and byte buffers wipe themselves; the word-sized
        // accumulators need explicit zeroization.
        self.acc.zeroize();
        self.prev.zeroize();
    }
}

/// Derive a key in one call, without chunking.
///
/// The returned buffer zeroizes itself on drop.
pub fn derive(
    password: &[u8],
    salt: &[u8],
    params: &DeriveParams,
) -> Result<Zeroizing<Vec<u8>>, KdfError> {
    let mut session = Session::new(password, salt, params)?;
    while session.step(u32::MAX)? != Progress::Finished {}
    Ok(Zeroizing::new(session.key().to_vec()))
}

/// Derive a key in one call and hex-encode it (`2 * key_len` digits).
pub fn derive_hex(
    password: &[u8],
    salt: &[u8],
    params: &DeriveParams,
    case: HexCase,
) -> Result<String, KdfError> {
    let key = derive(password, salt, params)?;
    Ok(bytes_to_hex(&key, case))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(iterations: u32, key_len: usize) -> DeriveParams {
        DeriveParams { iterations, key_len }
    }

    #[test]
    fn rejects_zero_iterations() {
        let res = Session::new(b"pw", b"salt", &params(0, 20));
        assert!(matches!(res, Err(KdfError::InvalidParameter(_))));
    }

    #[test]
    fn rejects_zero_key_len() {
        let res = Session::new(b"pw", b"salt", &params(1, 0));
        assert!(matches!(res, Err(KdfError::InvalidParameter(_))));
    }

    #[test]
    fn rfc6070_single_iteration() {
        let hex = derive_hex(b"password", b"salt", &params(1, 20), HexCase::Lower).unwrap();
        assert_eq!(hex, "0c60c80f961f0e71f3a9b524af6012062fe037a6");
    }

    #[test]
    fn key_is_empty_until_finished() {
        let mut session = Session::new(b"pw", b"salt", &params(100, 20)).unwrap();
        match session.step(10).unwrap() {
            Progress::Working(pct) => assert!((pct - 10.0).abs() < 1e-9),
            Progress::Finished => panic!("session finished early"),
        }
        assert!(session.key().is_empty());
        assert!(!session.is_finished());
    }

    #[test]
    fn finished_session_steps_are_noops() {
        let mut session = Session::new(b"pw", b"salt", &params(2, 20)).unwrap();
        while session.step(1).unwrap() != Progress::Finished {}
        let key = session.key().to_vec();
        assert_eq!(session.step(5).unwrap(), Progress::Finished);
        assert_eq!(session.key(), &key[..]);
        assert_eq!(session.percent(), 100.0);
    }

    #[test]
    fn hex_case_applies_to_key() {
        let lower = derive_hex(b"pw", b"salt", &params(3, 8), HexCase::Lower).unwrap();
        let upper = derive_hex(b"pw", b"salt", &params(3, 8), HexCase::Upper).unwrap();
        assert_eq!(lower.to_uppercase(), upper);
    }
}
