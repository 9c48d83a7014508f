use crate::domain::accounts::{AccountLookup, AccountProfile, AccountRepository, normalize};
use crate::domain::auth::AuthError;
use crate::shared::error::AppError;
use std::sync::Arc;

pub struct GetAccountUseCase {
    repo: Arc<dyn AccountRepository>,
}

impl GetAccountUseCase {
    pub fn new(repo: Arc<dyn AccountRepository>) -> Self {
        Self { repo }
    }

    /// Public profile by handle. Missing accounts are a 404, not a 401.
    pub async fn by_user_name(&self, user_name: &str) -> Result<AccountProfile, AppError> {
        let lookup = AccountLookup::UserName(normalize(user_name));

        self.repo
            .find_by_lookup(&lookup)
            .await?
            .map(|account| account.profile())
            .ok_or_else(|| AuthError::AccountNotFound.into())
    }
}
