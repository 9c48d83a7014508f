use crate::domain::accounts::AccountProfile;
use crate::domain::auth::AuthError;
use crate::infrastructure::state::AppState;
use crate::presentation::cookies::ACCESS_COOKIE;
use crate::shared::error::AppError;
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};
use axum_extra::extract::cookie::CookieJar;

/// Authenticated account extractor.
///
/// Reads the access token from the `accessToken` cookie, falling back to an
/// `Authorization: Bearer` header, verifies it, then loads the account.
pub struct AuthAccount {
    pub account: AccountProfile,
}

/// Cookie first, then bearer header. Empty values count as absent.
pub fn access_token_from_headers(headers: &HeaderMap) -> Option<String> {
    let from_cookie = CookieJar::from_headers(headers)
        .get(ACCESS_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty());

    from_cookie.or_else(|| {
        headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    })
}

impl FromRequestParts<AppState> for AuthAccount {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = access_token_from_headers(&parts.headers).ok_or(AuthError::MissingToken)?;

        let claims = state.auth_service.validate_access_token(&token)?;

        // a deleted account invalidates its outstanding tokens
        let account = state
            .accounts
            .find_by_id(claims.id)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        Ok(AuthAccount {
            account: account.profile(),
        })
    }
}
