use crate::application::auth::token_utils::{hash_token, issue_token_pair};
use crate::domain::accounts::AccountRepository;
use crate::domain::auth::{AuthError, AuthService, SessionStore, TokenPair};
use crate::shared::error::AppError;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

/// Body fallback for clients that cannot send the refresh cookie
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    pub refresh_token: Option<String>,
}

pub type RefreshTokenResponse = TokenPair;

pub struct RefreshTokenUseCase {
    account_repo: Arc<dyn AccountRepository>,
    sessions: Arc<dyn SessionStore>,
    auth_service: Arc<dyn AuthService>,
}

impl RefreshTokenUseCase {
    pub fn new(
        account_repo: Arc<dyn AccountRepository>,
        sessions: Arc<dyn SessionStore>,
        auth_service: Arc<dyn AuthService>,
    ) -> Self {
        Self {
            account_repo,
            sessions,
            auth_service,
        }
    }

    /// Exchange the presented refresh token for a new pair, retiring the old one.
    #[tracing::instrument(skip_all)]
    pub async fn execute(
        &self,
        presented: Option<String>,
    ) -> Result<RefreshTokenResponse, AppError> {
        let presented = presented
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingRefreshToken)?;

        let claims = self.auth_service.validate_refresh_token(&presented)?;

        let account = self
            .account_repo
            .find_by_id(claims.id)
            .await?
            .ok_or(AuthError::InvalidRefreshToken)?;

        let presented_hash = hash_token(&presented);

        // signature alone is not enough, the token must still be the active session
        if !self.sessions.validate(account.id, &presented_hash).await? {
            tracing::warn!("Superseded refresh token presented for account {}", account.id);
            return Err(AuthError::InvalidRefreshToken.into());
        }

        let tokens = issue_token_pair(&account, &self.auth_service)?;

        let rotated = self
            .sessions
            .rotate(account.id, &presented_hash, &hash_token(&tokens.refresh_token))
            .await?;

        if !rotated {
            tracing::warn!("Lost refresh race for account {}", account.id);
            return Err(AuthError::InvalidRefreshToken.into());
        }

        Ok(tokens)
    }
}
