//! Password hashing.
//!
//! One-way bcrypt digests with a per-hash random salt. The plaintext password
//! is never persisted and never logged; rejecting weak or empty passwords is
//! the auth service's job, not this layer's.

use crate::error::Result;
use bcrypt::{hash, verify, DEFAULT_COST};

/// Hash a plaintext password with a fresh salt.
pub fn hash_password(plaintext: &str) -> Result<String> {
    Ok(hash(plaintext, DEFAULT_COST)?)
}

/// Verify a plaintext password against a stored hash.
pub fn verify_password(plaintext: &str, hashed: &str) -> Result<bool> {
    Ok(verify(plaintext, hashed)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_never_equals_plaintext() {
        let hashed = hash_password("pw1").unwrap();
        assert_ne!(hashed, "pw1");
        assert!(verify_password("pw1", &hashed).unwrap());
    }

    #[test]
    fn test_wrong_password_fails_verification() {
        let hashed = hash_password("correct horse").unwrap();
        assert!(!verify_password("battery staple", &hashed).unwrap());
    }

    #[test]
    fn test_same_password_hashes_differently() {
        // Salted: two hashes of the same input must not collide.
        let a = hash_password("secret").unwrap();
        let b = hash_password("secret").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_empty_input_is_hashable() {
        let hashed = hash_password("").unwrap();
        assert!(verify_password("", &hashed).unwrap());
        assert!(!verify_password("x", &hashed).unwrap());
    }
}
