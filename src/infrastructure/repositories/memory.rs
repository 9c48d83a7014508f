use crate::domain::accounts::{Account, AccountLookup, AccountRepository, NewAccount};
use crate::domain::auth::SessionStore;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use time::OffsetDateTime;
use uuid::Uuid;

/// Process-local account store, used when no `DATABASE_URL` is configured
/// and by the test suites. Clones share the same accounts.
#[derive(Clone, Default)]
pub struct InMemoryAccountRepository {
    accounts: Arc<Mutex<HashMap<Uuid, Account>>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Uuid, Account>>> {
        self.accounts
            .lock()
            .map_err(|_| anyhow!("account store lock poisoned"))
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, new_account: NewAccount) -> Result<Option<Account>> {
        let mut accounts = self.lock()?;

        if accounts
            .values()
            .any(|a| a.user_name == new_account.user_name || a.email == new_account.email)
        {
            return Ok(None);
        }

        let now = OffsetDateTime::now_utc();
        let account = Account {
            id: Uuid::new_v4(),
            user_name: new_account.user_name,
            email: new_account.email,
            full_name: new_account.full_name,
            password_hash: new_account.password_hash,
            refresh_token_hash: None,
            created_at: now,
            updated_at: now,
        };
        accounts.insert(account.id, account.clone());

        Ok(Some(account))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>> {
        Ok(self.lock()?.get(&id).cloned())
    }

    async fn find_by_lookup(&self, lookup: &AccountLookup) -> Result<Option<Account>> {
        let accounts = self.lock()?;
        let found = accounts.values().find(|a| match lookup {
            AccountLookup::UserName(name) => &a.user_name == name,
            AccountLookup::Email(email) => &a.email == email,
        });

        Ok(found.cloned())
    }

    async fn exists(&self, user_name: &str, email: &str) -> Result<bool> {
        Ok(self
            .lock()?
            .values()
            .any(|a| a.user_name == user_name || a.email == email))
    }

    async fn update_password(&self, id: Uuid, password_hash: String) -> Result<bool> {
        match self.lock()?.get_mut(&id) {
            Some(account) => {
                account.password_hash = password_hash;
                account.updated_at = OffsetDateTime::now_utc();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self) -> Result<()> {
        self.lock().map(|_| ())
    }
}

#[async_trait]
impl SessionStore for InMemoryAccountRepository {
    async fn persist(&self, account_id: Uuid, token_hash: &str) -> Result<()> {
        if let Some(account) = self.lock()?.get_mut(&account_id) {
            account.refresh_token_hash = Some(token_hash.to_string());
        }
        Ok(())
    }

    async fn validate(&self, account_id: Uuid, token_hash: &str) -> Result<bool> {
        Ok(self
            .lock()?
            .get(&account_id)
            .and_then(|a| a.refresh_token_hash.as_deref())
            == Some(token_hash))
    }

    async fn clear(&self, account_id: Uuid) -> Result<()> {
        if let Some(account) = self.lock()?.get_mut(&account_id) {
            account.refresh_token_hash = None;
        }
        Ok(())
    }

    async fn rotate(&self, account_id: Uuid, current_hash: &str, new_hash: &str) -> Result<bool> {
        // compare and write under the same guard
        let mut accounts = self.lock()?;
        match accounts.get_mut(&account_id) {
            Some(account) if account.refresh_token_hash.as_deref() == Some(current_hash) => {
                account.refresh_token_hash = Some(new_hash.to_string());
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
