use crate::application::auth::credentials::CredentialVerifier;
use crate::domain::accounts::AccountRepository;
use crate::domain::auth::AuthError;
use crate::domain::password::PasswordHashingService;
use crate::shared::error::AppError;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Old password is required"))]
    pub old_password: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(min_length = 8)]
    pub new_password: String,
}

pub struct ChangePasswordUseCase {
    account_repo: Arc<dyn AccountRepository>,
    password_service: Arc<dyn PasswordHashingService>,
    verifier: CredentialVerifier,
}

impl ChangePasswordUseCase {
    pub fn new(
        account_repo: Arc<dyn AccountRepository>,
        password_service: Arc<dyn PasswordHashingService>,
    ) -> Self {
        Self {
            verifier: CredentialVerifier::new(account_repo.clone(), password_service.clone()),
            account_repo,
            password_service,
        }
    }

    #[tracing::instrument(skip(self, req))]
    pub async fn execute(&self, account_id: Uuid, req: ChangePasswordRequest) -> Result<(), AppError> {
        let account = self
            .account_repo
            .find_by_id(account_id)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        self.verifier.check_password(&account, &req.old_password)?;

        // hash first, the repository only ever sees the digest
        let password_hash = self
            .password_service
            .hash_password(&req.new_password)
            .map_err(AppError::InternalServerError)?;

        if !self
            .account_repo
            .update_password(account.id, password_hash)
            .await?
        {
            return Err(AuthError::InvalidToken.into());
        }

        tracing::info!("Password changed for account {}", account.id);
        Ok(())
    }
}
