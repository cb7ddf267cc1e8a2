//! Password hashing with Argon2
//!
//! Stored hashes are either Argon2 PHC strings (`$argon2id$...`) or lowercase
//! hex SHA-256 digests left by older account imports. Both verify here; new
//! hashes are always Argon2.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use sha2::{Digest, Sha256};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Hash error: {0}")]
    HashError(String),
}

pub struct PasswordService;

impl PasswordService {
    pub fn hash(password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| PasswordError::HashError(e.to_string()))
    }

    pub fn verify(password: &str, hash: &str) -> Result<bool, PasswordError> {
        if !hash.starts_with('$') {
            return Ok(Self::legacy_digest(password).eq_ignore_ascii_case(hash));
        }
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| PasswordError::HashError(e.to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Lowercase hex SHA-256 of the password, the legacy stored form.
    pub fn legacy_digest(password: &str) -> String {
        hex::encode(Sha256::digest(password.as_bytes()))
    }
}
