use crate::domain::accounts::Account;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

/// Upper bound on any token lifetime, ten years in seconds
pub const MAX_TOKEN_EXPIRY: i64 = 10 * 365 * 24 * 60 * 60;

/// Authentication failure taxonomy.
///
/// The variants exist for diagnostics. Everything except `AccountNotFound` and
/// `Signing` reaches the client as the same generic 401.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("missing access token")]
    MissingToken,
    #[error("invalid or expired access token")]
    InvalidToken,
    #[error("missing refresh token")]
    MissingRefreshToken,
    #[error("invalid, expired or superseded refresh token")]
    InvalidRefreshToken,
    #[error("token signing failed: {0}")]
    Signing(String),
    #[error("account not found")]
    AccountNotFound,
}

/// Access token claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessClaims {
    /// Account ID
    pub id: Uuid,
    pub email: String,
    pub user_name: String,
    pub full_name: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

impl AccessClaims {
    pub fn new(account: &Account, expiry_seconds: i64) -> Self {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        Self {
            id: account.id,
            email: account.email.clone(),
            user_name: account.user_name.clone(),
            full_name: account.full_name.clone(),
            iat: now,
            exp: now.saturating_add(expiry_seconds),
        }
    }
}

/// Refresh token claims. Deliberately minimal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// Account ID
    pub id: Uuid,
    /// Unique per token, so two refresh tokens minted in the same second differ
    pub jti: Uuid,
    pub iat: i64,
    pub exp: i64,
}

impl RefreshClaims {
    pub fn new(account_id: Uuid, expiry_seconds: i64) -> Self {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        Self {
            id: account_id,
            jti: Uuid::new_v4(),
            iat: now,
            exp: now.saturating_add(expiry_seconds),
        }
    }
}

/// Freshly minted access/refresh token pair
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub access_token_expiry: i64,
    pub refresh_token_expiry: i64,
}

/// Token issuer and validator
pub trait AuthService: Send + Sync {
    /// Sign an access token carrying the account's profile claims
    fn generate_access_token(&self, account: &Account) -> Result<String, AuthError>;

    /// Sign a refresh token carrying only the account ID
    fn generate_refresh_token(&self, account_id: Uuid) -> Result<String, AuthError>;

    /// Check signature and expiry against the access secret
    fn validate_access_token(&self, token: &str) -> Result<AccessClaims, AuthError>;

    /// Check signature and expiry against the refresh secret
    fn validate_refresh_token(&self, token: &str) -> Result<RefreshClaims, AuthError>;

    fn access_token_expiry(&self) -> i64;

    fn refresh_token_expiry(&self) -> i64;
}

/// The per-account refresh token slot.
///
/// Implementations store and compare token fingerprints, never raw tokens.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Overwrite the slot
    async fn persist(&self, account_id: Uuid, token_hash: &str) -> Result<()>;

    /// True only when the slot holds exactly `token_hash`
    async fn validate(&self, account_id: Uuid, token_hash: &str) -> Result<bool>;

    /// Empty the slot. Clearing an empty slot is not an error.
    async fn clear(&self, account_id: Uuid) -> Result<()>;

    /// Replace `current_hash` with `new_hash` in one atomic step.
    /// Returns false, leaving the slot untouched, if it no longer holds `current_hash`.
    async fn rotate(&self, account_id: Uuid, current_hash: &str, new_hash: &str) -> Result<bool>;
}
