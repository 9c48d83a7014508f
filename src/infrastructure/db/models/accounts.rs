use crate::domain::accounts::Account;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct AccountDbModel {
    pub id: Uuid,
    pub user_name: String,
    pub email: String,
    pub full_name: String,
    pub password_hash: String,
    pub refresh_token_hash: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<AccountDbModel> for Account {
    fn from(model: AccountDbModel) -> Self {
        Self {
            id: model.id,
            user_name: model.user_name,
            email: model.email,
            full_name: model.full_name,
            password_hash: model.password_hash,
            refresh_token_hash: model.refresh_token_hash,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
