use crate::domain::accounts::Account;
use crate::domain::auth::{AuthService, SessionStore, TokenPair};
use crate::shared::error::AppError;
use sha2::{Digest, Sha256};
use std::sync::Arc;

/// SHA-256 hex fingerprint of a token; this is what the session slot stores
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Mint an access/refresh pair for a verified account. Pure, no persistence.
pub fn issue_token_pair(
    account: &Account,
    auth_service: &Arc<dyn AuthService>,
) -> Result<TokenPair, AppError> {
    let access_token = auth_service.generate_access_token(account)?;
    let refresh_token = auth_service.generate_refresh_token(account.id)?;

    Ok(TokenPair {
        access_token,
        refresh_token,
        access_token_expiry: auth_service.access_token_expiry(),
        refresh_token_expiry: auth_service.refresh_token_expiry(),
    })
}

/// Mint a pair and make its refresh token the account's only active session
pub async fn issue_and_store_tokens(
    account: &Account,
    auth_service: &Arc<dyn AuthService>,
    sessions: &Arc<dyn SessionStore>,
) -> Result<TokenPair, AppError> {
    let pair = issue_token_pair(account, auth_service)?;

    sessions
        .persist(account.id, &hash_token(&pair.refresh_token))
        .await?;

    Ok(pair)
}
