//! Password hashing with Bcrypt or Argon2
//!
//! New hashes use the configured algorithm; verification recognises both
//! formats from the hash prefix so existing Bcrypt rows keep working after a
//! switch to Argon2 (and the other way round).

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

use mygroup_shared::config::{PasswordAlgorithm, SecuritySettings};

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Hash error: {0}")]
    HashError(String),
    #[error("Unsupported hash format")]
    UnsupportedHash,
    #[error("Hashing task failed: {0}")]
    TaskError(String),
}

#[derive(Debug, Clone, Copy)]
pub struct PasswordService {
    algorithm: PasswordAlgorithm,
    bcrypt_cost: u32,
}

impl PasswordService {
    pub fn new(settings: &SecuritySettings) -> Self {
        Self {
            algorithm: settings.password_algorithm,
            bcrypt_cost: settings.bcrypt_cost,
        }
    }

    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        match self.algorithm {
            PasswordAlgorithm::Bcrypt => bcrypt::hash(password, self.bcrypt_cost)
                .map_err(|e| PasswordError::HashError(e.to_string())),
            PasswordAlgorithm::Argon2 => {
                let salt = SaltString::generate(&mut OsRng);
                Argon2::default()
                    .hash_password(password.as_bytes(), &salt)
                    .map(|h| h.to_string())
                    .map_err(|e| PasswordError::HashError(e.to_string()))
            }
        }
    }

    pub fn verify(password: &str, hash: &str) -> Result<bool, PasswordError> {
        // $2a$, $2b$, $2y$
        if hash.starts_with("$2") {
            return bcrypt::verify(password, hash).map_err(|e| PasswordError::HashError(e.to_string()));
        }
        if hash.starts_with("$argon2") {
            let parsed_hash = PasswordHash::new(hash).map_err(|e| PasswordError::HashError(e.to_string()))?;
            return Ok(Argon2::default()
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok());
        }
        Err(PasswordError::UnsupportedHash)
    }

    /// [`Self::hash`] on the blocking pool.
    pub async fn hash_blocking(&self, password: String) -> Result<String, PasswordError> {
        let service = *self;
        tokio::task::spawn_blocking(move || service.hash(&password))
            .await
            .map_err(|e| PasswordError::TaskError(e.to_string()))?
    }

    /// [`Self::verify`] on the blocking pool.
    pub async fn verify_blocking(password: String, hash: String) -> Result<bool, PasswordError> {
        tokio::task::spawn_blocking(move || Self::verify(&password, &hash))
            .await
            .map_err(|e| PasswordError::TaskError(e.to_string()))?
    }
}
