//! Password hashing and verification.
//!
//! Argon2 with a fresh random salt per hash; the stored value is a PHC
//! string that embeds algorithm, parameters, and salt.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

#[derive(Debug, thiserror::Error)]
#[error("password hashing failed: {0}")]
pub struct PasswordHashError(String);

pub fn hash_password(raw: &str) -> Result<String, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(raw.as_bytes(), &salt)
        .map_err(|e| PasswordHashError(e.to_string()))?
        .to_string();

    Ok(hash)
}

pub fn verify_password(raw: &str, stored_hash: &str) -> Result<bool, PasswordHashError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| PasswordHashError(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(raw.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hash = hash_password("s3cret-pass").unwrap();

        assert_ne!(hash, "s3cret-pass");
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("s3cret-pass", &hash).unwrap());
        assert!(!verify_password("wrong-pass", &hash).unwrap());
    }

    #[test]
    fn same_password_hashes_differently() {
        // fresh salt per call
        let first = hash_password("1234").unwrap();
        let second = hash_password("1234").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn verify_rejects_malformed_hash() {
        assert!(verify_password("1234", "not-a-phc-string").is_err());
    }
}
