use crate::domain::password::PasswordHashingService;
use anyhow::Result;
use std::sync::OnceLock;
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

static DUMMY_HASH: OnceLock<String> = OnceLock::new();

/// Argon2id hasher. Cost parameters are encoded in each PHC string, so hashes
/// made under older parameters still verify.
#[derive(Clone, Default)]
pub struct PasswordService {
    argon2: Argon2<'static>,
}

impl PasswordService {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordHashingService for PasswordService {
    fn hash_password(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;

        Ok(hash.to_string())
    }

    fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| anyhow::anyhow!("Invalid password hash: {}", e))?;

        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    fn dummy_hash(&self) -> Result<String> {
        if let Some(hash) = DUMMY_HASH.get() {
            return Ok(hash.clone());
        }

        let hash = self.hash_password("vidhub-unknown-account")?;
        Ok(DUMMY_HASH.get_or_init(|| hash).clone())
    }
}
