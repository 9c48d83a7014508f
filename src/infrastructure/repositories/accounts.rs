use crate::domain::accounts::{Account, AccountLookup, AccountRepository, NewAccount};
use crate::domain::auth::SessionStore;
use crate::infrastructure::db::DbPool;
use crate::infrastructure::db::models::accounts::AccountDbModel;
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

const ACCOUNT_COLUMNS: &str = "id, user_name, email, full_name, password_hash, refresh_token_hash, created_at, updated_at";

/// Accounts table. The session slot is the `refresh_token_hash` column.
#[derive(Clone)]
pub struct PostgresAccountRepository {
    pool: DbPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create(&self, new_account: NewAccount) -> Result<Option<Account>> {
        let query = format!(
            r#"
            INSERT INTO accounts (user_name, email, full_name, password_hash)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT DO NOTHING
            RETURNING {ACCOUNT_COLUMNS}
            "#
        );

        let account = sqlx::query_as::<_, AccountDbModel>(&query)
            .bind(new_account.user_name)
            .bind(new_account.email)
            .bind(new_account.full_name)
            .bind(new_account.password_hash)
            .fetch_optional(&self.pool)
            .await?;

        // a unique-constraint conflict inserts no row
        Ok(account.map(Into::into))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>> {
        let query = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1");

        let account = sqlx::query_as::<_, AccountDbModel>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(account.map(Into::into))
    }

    async fn find_by_lookup(&self, lookup: &AccountLookup) -> Result<Option<Account>> {
        let (column, value) = match lookup {
            AccountLookup::UserName(name) => ("user_name", name),
            AccountLookup::Email(email) => ("email", email),
        };
        let query = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE {column} = $1");

        let account = sqlx::query_as::<_, AccountDbModel>(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        Ok(account.map(Into::into))
    }

    async fn exists(&self, user_name: &str, email: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM accounts WHERE user_name = $1 OR email = $2)",
        )
        .bind(user_name)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn update_password(&self, id: Uuid, password_hash: String) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET password_hash = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl SessionStore for PostgresAccountRepository {
    async fn persist(&self, account_id: Uuid, token_hash: &str) -> Result<()> {
        sqlx::query("UPDATE accounts SET refresh_token_hash = $2 WHERE id = $1")
            .bind(account_id)
            .bind(token_hash)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn validate(&self, account_id: Uuid, token_hash: &str) -> Result<bool> {
        let matches: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM accounts WHERE id = $1 AND refresh_token_hash = $2)",
        )
        .bind(account_id)
        .bind(token_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(matches)
    }

    async fn clear(&self, account_id: Uuid) -> Result<()> {
        sqlx::query("UPDATE accounts SET refresh_token_hash = NULL WHERE id = $1")
            .bind(account_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn rotate(&self, account_id: Uuid, current_hash: &str, new_hash: &str) -> Result<bool> {
        // single conditional write, so concurrent refreshes cannot both win
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET refresh_token_hash = $3
            WHERE id = $1 AND refresh_token_hash = $2
            "#,
        )
        .bind(account_id)
        .bind(current_hash)
        .bind(new_hash)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
