//! SHA-1 over word arrays with an exact bit length.
//!
//! The input shape is a big-endian word array plus the bit count of the
//! meaningful content, because padding depends on the exact bit length, not
//! the word-array size. All arithmetic is modulo 2^32 via the native
//! wrapping operations.
//!
//! Limitation: the length field written during padding only carries 32
//! meaningful bits, so inputs of 2^32 bits (512 MiB) or more are rejected
//! with [`KdfError::MessageTooLong`] instead of being silently mis-padded.

use crate::types::KdfError;
use crate::words::bytes_to_words;

/// SHA-1 digest length in bytes.
pub const DIGEST_LEN: usize = 20;

/// SHA-1 digest length in bits.
pub const DIGEST_BITS: u64 = 160;

/// Initial register values (FIPS 180-4 §5.3.1).
const H_INIT: [u32; 5] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476, 0xc3d2e1f0];

/// Per-range round constants for rounds [0,20), [20,40), [40,60), [60,80).
const K: [u32; 4] = [0x5a827999, 0x6ed9eba1, 0x8f1bbcdc, 0xca62c1d6];

/// Compute the SHA-1 digest of `bit_len` bits held in `words`.
///
/// `words` must hold at least `ceil(bit_len / 32)` entries with any bits
/// beyond `bit_len` in the final word set to zero.
pub fn sha1_words(mut words: Vec<u32>, bit_len: u64) -> Result<[u32; 5], KdfError> {
    if bit_len > u64::from(u32::MAX) {
        return Err(KdfError::MessageTooLong);
    }

    // Append the single 1 bit immediately after the last meaningful bit.
    let word_idx = (bit_len >> 5) as usize;
    if word_idx >= words.len() {
        words.resize(word_idx + 1, 0);
    }
    let bit_in_word = (bit_len & 31) as u32;
    words[word_idx] |= 1u32 << (31 - bit_in_word);

    // Zero-fill to 448 mod 512 bits, then the 64-bit big-endian length in
    // the final two words (high word is zero under the guard above).
    let total_words = (bit_len + 1 + 64).div_ceil(512) as usize * 16;
    words.resize(total_words, 0);
    words[total_words - 1] = bit_len as u32;

    let mut h = H_INIT;
    for chunk in words.chunks_exact(16) {
        process_chunk(&mut h, chunk);
    }
    Ok(h)
}

/// Convenience wrapper: SHA-1 of a byte string.
pub fn sha1(bytes: &[u8]) -> Result<[u32; 5], KdfError> {
    sha1_words(bytes_to_words(bytes), 8 * bytes.len() as u64)
}

/// One 512-bit chunk: expand to the 80-word schedule, run 80 rounds, add
/// the working registers back into the running totals.
fn process_chunk(h: &mut [u32; 5], chunk: &[u32]) {
    let mut w = [0u32; 80];
    w[..16].copy_from_slice(chunk);
    for j in 16..80 {
        w[j] = (w[j - 3] ^ w[j - 8] ^ w[j - 14] ^ w[j - 16]).rotate_left(1);
    }

    let [mut a, mut b, mut c, mut d, mut e] = *h;
    for (j, &wj) in w.iter().enumerate() {
        let f = match j / 20 {
            0 => (b & c) | (!b & d),
            1 => b ^ c ^ d,
            2 => (b & c) | (b & d) | (c & d),
            _ => b ^ c ^ d,
        };
        let t = a
            .rotate_left(5)
            .wrapping_add(f)
            .wrapping_add(e)
            .wrapping_add(K[j / 20])
            .wrapping_add(wj);
        e = d;
        d = c;
        c = b.rotate_left(30);
        b = a;
        a = t;
    }

    h[0] = h[0].wrapping_add(a);
    h[1] = h[1].wrapping_add(b);
    h[2] = h[2].wrapping_add(c);
    h[3] = h[3].wrapping_add(d);
    h[4] = h[4].wrapping_add(e);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HexCase;
    use crate::words::{bytes_to_hex, words_to_bytes};

    fn sha1_hex(input: &[u8]) -> String {
        bytes_to_hex(&words_to_bytes(&sha1(input).unwrap()), HexCase::Lower)
    }

    #[test]
    fn empty_input() {
        assert_eq!(sha1_hex(b""), "da39a3ee5e6b4b0d3255bfef95601890afd80709");
    }

    #[test]
    fn abc() {
        assert_eq!(sha1_hex(b"abc"), "a9993e364706816aba3e25717850c26c9cd0d89d");
    }

    #[test]
    fn two_block_boundary_input() {
        // 448 bits: padding forces a second 512-bit block.
        let msg = b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq";
        assert_eq!(sha1_hex(msg), "84983e441c3bd26ebaae4aa1f95129e5e54670f1");
    }

    #[test]
    fn million_a() {
        let msg = vec![b'a'; 1_000_000];
        assert_eq!(sha1_hex(&msg), "34aa973cd4c4daa4f61eeb2bdbad27316534016f");
    }

    #[test]
    fn matches_rustcrypto_on_varied_lengths() {
        use sha1::{Digest, Sha1};
        for len in [0usize, 1, 3, 4, 55, 56, 63, 64, 65, 200] {
            let msg: Vec<u8> = (0..len).map(|i| i as u8).collect();
            let expected = hex::encode(Sha1::digest(&msg));
            assert_eq!(sha1_hex(&msg), expected, "len={len}");
        }
    }

    #[test]
    fn oversized_bit_length_rejected() {
        let res = sha1_words(vec![0u32; 4], u64::from(u32::MAX) + 1);
        assert!(matches!(res, Err(KdfError::MessageTooLong)));
    }
}
