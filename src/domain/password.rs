use anyhow::Result;

/// Trait for password hashing and verification
pub trait PasswordHashingService: Send + Sync {
    /// One-way hash with a fresh random salt
    fn hash_password(&self, password: &str) -> Result<String>;
    fn verify_password(&self, password: &str, hash: &str) -> Result<bool>;
    /// A valid hash of no real password. Verifying against it costs the same
    /// as a real check, for lookups that found no account.
    fn dummy_hash(&self) -> Result<String>;
}
