use crate::application::auth::credentials::CredentialVerifier;
use crate::application::auth::token_utils::issue_and_store_tokens;
use crate::domain::accounts::{AccountLookup, AccountProfile, AccountRepository};
use crate::domain::auth::{AuthService, SessionStore, TokenPair};
use crate::domain::password::PasswordHashingService;
use crate::shared::error::AppError;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

/// Either `userName` or `email` identifies the account.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "alice")]
    pub user_name: Option<String>,

    #[schema(example = "alice@x.com")]
    pub email: Option<String>,

    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "P@ssw0rd1")]
    pub password: String,
}

#[derive(Debug)]
pub struct LoginResponse {
    pub account: AccountProfile,
    pub tokens: TokenPair,
}

pub struct LoginUseCase {
    verifier: CredentialVerifier,
    sessions: Arc<dyn SessionStore>,
    auth_service: Arc<dyn AuthService>,
}

impl LoginUseCase {
    pub fn new(
        account_repo: Arc<dyn AccountRepository>,
        sessions: Arc<dyn SessionStore>,
        auth_service: Arc<dyn AuthService>,
        password_service: Arc<dyn PasswordHashingService>,
    ) -> Self {
        Self {
            verifier: CredentialVerifier::new(account_repo, password_service),
            sessions,
            auth_service,
        }
    }

    #[tracing::instrument(skip(self, req))]
    pub async fn execute(&self, req: LoginRequest) -> Result<LoginResponse, AppError> {
        let lookup = AccountLookup::from_parts(req.user_name.as_deref(), req.email.as_deref())
            .ok_or_else(|| {
                AppError::ValidationError("Username or email is required".to_string())
            })?;

        let account = self.verifier.verify(&lookup, &req.password).await?;

        // overwriting the slot ends any earlier session
        let tokens = issue_and_store_tokens(&account, &self.auth_service, &self.sessions).await?;

        tracing::info!("Account {} logged in", account.id);

        Ok(LoginResponse {
            account: account.profile(),
            tokens,
        })
    }
}
