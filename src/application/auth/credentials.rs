use crate::domain::accounts::{Account, AccountLookup, AccountRepository};
use crate::domain::auth::AuthError;
use crate::domain::password::PasswordHashingService;
use crate::shared::error::AppError;
use std::sync::Arc;

/// Checks a handle/email and password against the stored hash.
///
/// An unknown account and a wrong password produce the same
/// `AuthError::InvalidCredentials`.
pub struct CredentialVerifier {
    account_repo: Arc<dyn AccountRepository>,
    password_service: Arc<dyn PasswordHashingService>,
}

impl CredentialVerifier {
    pub fn new(
        account_repo: Arc<dyn AccountRepository>,
        password_service: Arc<dyn PasswordHashingService>,
    ) -> Self {
        Self {
            account_repo,
            password_service,
        }
    }

    #[tracing::instrument(skip(self, password))]
    pub async fn verify(&self, lookup: &AccountLookup, password: &str) -> Result<Account, AppError> {
        let Some(account) = self.account_repo.find_by_lookup(lookup).await? else {
            tracing::debug!("No account for lookup");
            // same argon2 work as a wrong password, so timing does not reveal the miss
            let dummy = self.password_service.dummy_hash()?;
            self.password_service.verify_password(password, &dummy)?;
            return Err(AuthError::InvalidCredentials.into());
        };

        self.check_password(&account, password)?;

        Ok(account)
    }

    /// Password check against an already loaded account
    pub fn check_password(&self, account: &Account, password: &str) -> Result<(), AppError> {
        let valid = self
            .password_service
            .verify_password(password, &account.password_hash)
            .map_err(|e| {
                tracing::error!("Password verification internal error: {}", e);
                AppError::InternalServerError(e)
            })?;

        if !valid {
            tracing::debug!("Password mismatch for account {}", account.id);
            return Err(AuthError::InvalidCredentials.into());
        }

        Ok(())
    }
}
