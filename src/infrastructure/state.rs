use crate::domain::accounts::AccountRepository;
use crate::domain::auth::{AuthService, SessionStore};
use crate::domain::password::PasswordHashingService;
use crate::infrastructure::auth::JwtAuthService;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::db::DbPool;
use crate::infrastructure::password::PasswordService;
use crate::infrastructure::repositories::accounts::PostgresAccountRepository;
use crate::infrastructure::repositories::memory::InMemoryAccountRepository;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub accounts: Arc<dyn AccountRepository>,
    pub sessions: Arc<dyn SessionStore>,
    pub auth_service: Arc<dyn AuthService>,
    pub password_service: Arc<dyn PasswordHashingService>,
}

impl AppState {
    /// Builds the token service from `config`, failing if its secrets are unusable.
    pub fn new(
        config: AppConfig,
        accounts: Arc<dyn AccountRepository>,
        sessions: Arc<dyn SessionStore>,
    ) -> anyhow::Result<Self> {
        let auth_service = JwtAuthService::new(
            &config.access_token_secret,
            &config.refresh_token_secret,
            config.access_token_expiry,
            config.refresh_token_expiry,
        )?;

        Ok(Self {
            config: Arc::new(config),
            accounts,
            sessions,
            auth_service: Arc::new(auth_service),
            password_service: Arc::new(PasswordService::new()),
        })
    }

    pub fn postgres(config: AppConfig, pool: DbPool) -> anyhow::Result<Self> {
        let repo = Arc::new(PostgresAccountRepository::new(pool));
        Self::new(config, repo.clone(), repo)
    }

    pub fn in_memory(config: AppConfig) -> anyhow::Result<Self> {
        let repo = Arc::new(InMemoryAccountRepository::new());
        Self::new(config, repo.clone(), repo)
    }
}
