//! Random salt generation.

use getrandom::fill as getrandom;

use crate::types::KdfError;

/// Generate a cryptographically secure random salt of `len` bytes.
pub fn generate_salt(len: usize) -> Result<Vec<u8>, KdfError> {
    if len == 0 {
        return Err(KdfError::InvalidParameter("salt length must be > 0"));
    }
    let mut salt = vec![0u8; len];
    getrandom(&mut salt).map_err(|_| KdfError::Rng)?;
    Ok(salt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_length() {
        assert!(matches!(
            generate_salt(0),
            Err(KdfError::InvalidParameter(_))
        ));
    }

    #[test]
    fn produces_requested_length() {
        assert_eq!(generate_salt(16).unwrap().len(), 16);
        assert_eq!(generate_salt(1).unwrap().len(), 1);
    }

    #[test]
    fn consecutive_salts_differ() {
        assert_ne!(generate_salt(16).unwrap(), generate_salt(16).unwrap());
    }
}
