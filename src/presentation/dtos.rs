use crate::application::auth::login::LoginResponse;
use crate::domain::accounts::AccountProfile;
use crate::domain::auth::TokenPair;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Public account attributes
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountResource {
    pub id: Uuid,
    #[schema(example = "alice")]
    pub user_name: String,
    #[schema(example = "alice@x.com")]
    pub email: String,
    #[schema(example = "Alice Liddell")]
    pub full_name: String,
    /// ISO 8601
    pub created_at: String,
    /// ISO 8601
    pub updated_at: String,
}

impl From<AccountProfile> for AccountResource {
    fn from(profile: AccountProfile) -> Self {
        let iso = |t: time::OffsetDateTime| {
            t.format(&time::format_description::well_known::Iso8601::DEFAULT)
                .unwrap_or_default()
        };

        Self {
            id: profile.id,
            user_name: profile.user_name,
            email: profile.email,
            full_name: profile.full_name,
            created_at: iso(profile.created_at),
            updated_at: iso(profile.updated_at),
        }
    }
}

/// Token pair attributes. The same values are also set as cookies.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokenResource {
    pub access_token: String,
    pub refresh_token: String,
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Access token lifetime in seconds
    #[schema(example = 900)]
    pub expires_in: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<AccountResource>,
}

impl From<TokenPair> for AuthTokenResource {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: pair.access_token_expiry,
            account: None,
        }
    }
}

impl From<LoginResponse> for AuthTokenResource {
    fn from(response: LoginResponse) -> Self {
        Self {
            account: Some(AccountResource::from(response.account)),
            ..Self::from(response.tokens)
        }
    }
}
