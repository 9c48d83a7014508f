use crate::domain::auth::SessionStore;
use crate::shared::error::AppError;
use std::sync::Arc;
use uuid::Uuid;

pub struct LogoutUseCase {
    sessions: Arc<dyn SessionStore>,
}

impl LogoutUseCase {
    pub fn new(sessions: Arc<dyn SessionStore>) -> Self {
        Self { sessions }
    }

    /// Empties the session slot. Succeeds even when there was no session.
    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, account_id: Uuid) -> Result<(), AppError> {
        self.sessions.clear(account_id).await?;
        tracing::info!("Account {} logged out", account_id);
        Ok(())
    }
}
