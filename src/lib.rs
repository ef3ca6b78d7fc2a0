#![forbid(unsafe_code)]
//! # keystretch — PBKDF2-HMAC-SHA1 key derivation with incremental progress.
//!
//! `keystretch` stretches a low-entropy passphrase and a salt into a
//! fixed-length key using PBKDF2 over HMAC-SHA-1 (RFC 2898), built from
//! scratch on its own SHA-1 core. The derivation can run as one call or as
//! a resumable session advanced in bounded chunks, so a cooperative
//! single-threaded host can keep other work moving during a long stretch.
//!
//! ## Features
//! - **PBKDF2-HMAC-SHA1** byte-for-byte interoperable with RFC 6070 vectors
//! - **Resumable sessions** advanced a bounded number of iterations at a time
//! - **Two-callback delivery**: non-decreasing progress percent, then the
//!   hex key exactly once
//! - **Injectable yield hook** so the same loop runs under a plain thread
//!   or a cooperative scheduler
//! - **Zeroized secrets**: pads, session state, and derived keys are wiped
//!   on drop
//!
//! ## Example: one-shot derivation
//! ```
//! use keystretch::{DeriveParams, HexCase, derive_hex};
//!
//! let params = DeriveParams { iterations: 4096, key_len: 20 };
//! let key = derive_hex(b"password", b"salt", &params, HexCase::Lower)?;
//! assert_eq!(key, "4b007901b765489abead49d926f721d065a429c1");
//! # Ok::<(), keystretch::KdfError>(())
//! ```
//!
//! ## Example: chunked derivation with progress
//! ```
//! use keystretch::{DeriveParams, Scheduler, Session};
//!
//! let params = DeriveParams { iterations: 1000, key_len: 32 };
//! let session = Session::new(b"correct horse", b"battery staple", &params)?;
//! let mut key = String::new();
//! Scheduler::new(session)
//!     .with_chunk_size(100)
//!     .run(|pct| assert!((0.0..=100.0).contains(&pct)), |hex| key = hex)?;
//! assert_eq!(key.len(), 64);
//! # Ok::<(), keystretch::KdfError>(())
//! ```
//!
//! Safety notes
//! - Exactly one PRF and one KDF; no algorithm negotiation. No
//!   side-channel-hardening guarantees beyond word-sized integer
//!   arithmetic.

mod types;
mod words;
mod sha1;
mod hmac;
mod pbkdf2;
mod scheduler;
mod salt;

// Re-export public API from modules. The `self::` prefix keeps the paths
// unambiguous next to the same-named RustCrypto dev-dependencies.
pub use types::*;
pub use words::{bytes_to_hex, bytes_to_words, words_to_bytes};
pub use self::sha1::{DIGEST_LEN, sha1};
pub use self::hmac::HmacSha1;
pub use self::pbkdf2::{Progress, Session, derive, derive_hex};
pub use scheduler::Scheduler;
pub use salt::generate_salt;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_smoke() {
        let params = DeriveParams { iterations: 2, key_len: 20 };
        let a = derive_hex(b"pw", b"salt", &params, HexCase::Lower).unwrap();
        let b = derive_hex(b"pw", b"salt", &params, HexCase::Lower).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 40);
    }

    #[test]
    fn invalid_params_surface_as_errors() {
        let zero_iter = DeriveParams { iterations: 0, key_len: 20 };
        assert!(matches!(
            derive(b"pw", b"salt", &zero_iter),
            Err(KdfError::InvalidParameter(_))
        ));
    }
}
