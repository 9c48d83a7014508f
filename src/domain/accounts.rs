use async_trait::async_trait;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

/// Registered account.
///
/// `password_hash` and `refresh_token_hash` are secret material and are never
/// serialized; use [`AccountProfile`] for anything that leaves the service.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub user_name: String,
    pub email: String,
    pub full_name: String,
    pub password_hash: String,
    /// Fingerprint of the one active refresh token, if any.
    pub refresh_token_hash: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Account {
    pub fn profile(&self) -> AccountProfile {
        AccountProfile::from(self.clone())
    }
}

/// Public view of an account, safe to attach to requests and responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountProfile {
    pub id: Uuid,
    pub user_name: String,
    pub email: String,
    pub full_name: String,
    #[serde(with = "time::serde::iso8601")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::iso8601")]
    pub updated_at: OffsetDateTime,
}

impl From<Account> for AccountProfile {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            user_name: account.user_name,
            email: account.email,
            full_name: account.full_name,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

/// Data for a new account. Only ever carries an already computed hash.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub user_name: String,
    pub email: String,
    pub full_name: String,
    pub password_hash: String,
}

/// Handle or email used to find an account at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountLookup {
    UserName(String),
    Email(String),
}

impl AccountLookup {
    /// Builds a lookup key from optional login fields, preferring the handle.
    /// Returns `None` when both are absent or blank.
    pub fn from_parts(user_name: Option<&str>, email: Option<&str>) -> Option<Self> {
        let user_name = user_name.map(normalize).filter(|s| !s.is_empty());
        let email = email.map(normalize).filter(|s| !s.is_empty());

        match (user_name, email) {
            (Some(name), _) => Some(Self::UserName(name)),
            (None, Some(email)) => Some(Self::Email(email)),
            (None, None) => None,
        }
    }
}

/// Handles and emails are unique case-insensitively.
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// `None` when the handle or email is already taken.
    async fn create(&self, new_account: NewAccount) -> Result<Option<Account>, anyhow::Error>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, anyhow::Error>;
    async fn find_by_lookup(&self, lookup: &AccountLookup)
    -> Result<Option<Account>, anyhow::Error>;
    /// True when either the handle or the email is already taken.
    async fn exists(&self, user_name: &str, email: &str) -> Result<bool, anyhow::Error>;
    async fn update_password(&self, id: Uuid, password_hash: String)
    -> Result<bool, anyhow::Error>;
    async fn ping(&self) -> Result<(), anyhow::Error>;
}
