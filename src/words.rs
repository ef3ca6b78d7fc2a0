//! Conversions between byte strings and big-endian 32-bit word arrays,
//! plus hex rendering.
//!
//! A byte string of N bytes packs into exactly `ceil(N / 4)` words; unused
//! trailing bits of a partial final word are zero. Word arrays carry no
//! length of their own, so callers that need the exact content size track a
//! bit length alongside (SHA-1 padding depends on it).

use crate::types::HexCase;

/// Pack a byte string into big-endian 32-bit words, 4 bytes per word.
///
/// Trailing bits of a partial final word are zero-filled. The bit length of
/// the content is `bytes.len() * 8`.
pub fn bytes_to_words(bytes: &[u8]) -> Vec<u32> {
    let mut words = vec![0u32; bytes.len().div_ceil(4)];
    for (i, &b) in bytes.iter().enumerate() {
        words[i >> 2] |= u32::from(b) << (24 - 8 * (i & 3));
    }
    words
}

/// Unpack big-endian words into bytes, emitting `4 * words.len()` bytes.
///
/// Callers truncate when the content is shorter than the word array (e.g.
/// the final short block of a derived key).
pub fn words_to_bytes(words: &[u32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(words.len() * 4);
    for w in words {
        bytes.extend_from_slice(&w.to_be_bytes());
    }
    bytes
}

/// Hex-encode bytes, two digits per byte, in the requested case.
pub fn bytes_to_hex(bytes: &[u8], case: HexCase) -> String {
    const LOWER: &[u8; 16] = b"0123456789abcdef";
    const UPPER: &[u8; 16] = b"0123456789ABCDEF";
    let table = match case {
        HexCase::Lower => LOWER,
        HexCase::Upper => UPPER,
    };
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        out.push(table[(b >> 4) as usize] as char);
        out.push(table[(b & 0x0f) as usize] as char);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_big_endian() {
        assert_eq!(bytes_to_words(b"abcd"), vec![0x61626364]);
        assert_eq!(bytes_to_words(b"abcde"), vec![0x61626364, 0x65000000]);
        assert_eq!(bytes_to_words(b""), Vec::<u32>::new());
    }

    #[test]
    fn unpack_is_inverse_up_to_padding() {
        for len in 0..9 {
            let bytes: Vec<u8> = (0..len as u8).collect();
            let back = words_to_bytes(&bytes_to_words(&bytes));
            assert_eq!(&back[..bytes.len()], &bytes[..]);
            assert!(back[bytes.len()..].iter().all(|&b| b == 0));
        }
    }

    #[test]
    fn hex_cases() {
        assert_eq!(bytes_to_hex(&[0x00, 0xab, 0xcd, 0xef], HexCase::Lower), "00abcdef");
        assert_eq!(bytes_to_hex(&[0x00, 0xab, 0xcd, 0xef], HexCase::Upper), "00ABCDEF");
        assert_eq!(bytes_to_hex(&[], HexCase::Lower), "");
    }

    #[test]
    fn hex_matches_hex_crate() {
        let data: Vec<u8> = (0..=255).collect();
        assert_eq!(bytes_to_hex(&data, HexCase::Lower), hex::encode(&data));
    }
}
