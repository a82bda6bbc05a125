//! services/api/src/adapters/password.rs
//!
//! Argon2 implementation of the `PasswordService` port.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use story_hub_core::ports::{PasswordService, PortError, PortResult};
use tracing::error;

/// Hashes with Argon2id and a fresh random salt, stored as a PHC string.
#[derive(Clone, Default)]
pub struct Argon2PasswordAdapter {
    argon2: Argon2<'static>,
}

impl Argon2PasswordAdapter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordService for Argon2PasswordAdapter {
    fn hash_password(&self, password: &str) -> PortResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| {
                error!("Failed to hash password: {:?}", e);
                PortError::Unexpected("Failed to hash password".to_string())
            })
    }

    fn verify_password(&self, password: &str, hashed_password: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hashed_password) {
            Ok(hash) => hash,
            Err(e) => {
                error!("Failed to parse stored password hash: {:?}", e);
                return false;
            }
        };
        self.argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}
