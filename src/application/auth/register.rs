use crate::domain::accounts::{AccountProfile, AccountRepository, NewAccount, normalize};
use crate::domain::password::PasswordHashingService;
use crate::shared::error::AppError;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 64, message = "Username must be 3 to 64 characters"))]
    #[schema(example = "alice", min_length = 3)]
    pub user_name: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "alice@x.com")]
    pub email: String,
    #[validate(length(min = 1, max = 255, message = "Full name is required"))]
    #[schema(example = "Alice Liddell")]
    pub full_name: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "P@ssw0rd1", min_length = 8)]
    pub password: String,
}

fn already_exists() -> AppError {
    AppError::Conflict("Account already exists".to_string())
}

pub struct RegisterUseCase {
    account_repo: Arc<dyn AccountRepository>,
    password_service: Arc<dyn PasswordHashingService>,
}

impl RegisterUseCase {
    pub fn new(
        account_repo: Arc<dyn AccountRepository>,
        password_service: Arc<dyn PasswordHashingService>,
    ) -> Self {
        Self {
            account_repo,
            password_service,
        }
    }

    #[tracing::instrument(skip(self, req), fields(user_name = %req.user_name))]
    pub async fn execute(&self, req: RegisterRequest) -> Result<AccountProfile, AppError> {
        let user_name = normalize(&req.user_name);
        let email = normalize(&req.email);

        if user_name.len() < 3 {
            return Err(AppError::ValidationError(
                "userName: Username must be 3 to 64 characters".to_string(),
            ));
        }

        // one message for both fields, so registration does not reveal which is taken
        if self.account_repo.exists(&user_name, &email).await? {
            return Err(already_exists());
        }

        let password_hash = self
            .password_service
            .hash_password(&req.password)
            .map_err(AppError::InternalServerError)?;

        let account = self
            .account_repo
            .create(NewAccount {
                user_name,
                email,
                full_name: req.full_name.trim().to_string(),
                password_hash,
            })
            .await?
            // a concurrent registration took the handle or email after the check above
            .ok_or_else(already_exists)?;

        tracing::info!("Registered account {}", account.id);

        Ok(account.profile())
    }
}
