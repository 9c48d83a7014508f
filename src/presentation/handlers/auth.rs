use crate::application::auth::change_password::{ChangePasswordRequest, ChangePasswordUseCase};
use crate::application::auth::login::{LoginRequest, LoginUseCase};
use crate::application::auth::logout::LogoutUseCase;
use crate::application::auth::refresh::{RefreshTokenRequest, RefreshTokenUseCase};
use crate::application::auth::register::{RegisterRequest, RegisterUseCase};
use crate::domain::auth::TokenPair;
use crate::infrastructure::state::AppState;
use crate::presentation::cookies::{REFRESH_COOKIE, access_cookie, cleared_cookies, refresh_cookie};
use crate::presentation::dtos::{AccountResource, AuthTokenResource};
use crate::presentation::extractors::AuthAccount;
use crate::shared::error::{AppError, ErrorResponse};
use crate::shared::response::{JsonApiResource, JsonApiResponse};
use crate::shared::validation::ValidatedJson;
use axum::{Json, body::Bytes, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;

fn with_token_cookies(jar: CookieJar, tokens: &TokenPair, secure: bool) -> CookieJar {
    jar.add(access_cookie(
        &tokens.access_token,
        tokens.access_token_expiry,
        secure,
    ))
    .add(refresh_cookie(
        &tokens.refresh_token,
        tokens.refresh_token_expiry,
        secure,
    ))
}

/// Register handler
#[utoipa::path(
    post,
    path = "/api/v1/users/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = JsonApiResponse<JsonApiResource<AccountResource>>),
        (status = 409, description = "Account already exists", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let use_case = RegisterUseCase::new(state.accounts, state.password_service);

    let profile = use_case.execute(req).await?;
    let resource = JsonApiResource::new(
        "accounts",
        profile.id.to_string(),
        AccountResource::from(profile),
    );

    Ok((StatusCode::CREATED, Json(JsonApiResponse::new(resource))))
}

/// Login handler
#[utoipa::path(
    post,
    path = "/api/v1/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful, token cookies set", body = JsonApiResponse<JsonApiResource<AuthTokenResource>>),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let secure = state.config.cookie_secure;
    let use_case = LoginUseCase::new(
        state.accounts,
        state.sessions,
        state.auth_service,
        state.password_service,
    );

    let response = use_case.execute(req).await?;
    let jar = with_token_cookies(jar, &response.tokens, secure);
    let resource = JsonApiResource::new(
        "auth-tokens",
        response.account.id.to_string(),
        AuthTokenResource::from(response),
    );

    Ok((StatusCode::OK, jar, Json(JsonApiResponse::new(resource))))
}

/// Refresh token handler
#[utoipa::path(
    post,
    path = "/api/v1/users/refresh-token",
    request_body(content = RefreshTokenRequest, description = "Only read when the refreshToken cookie is absent"),
    responses(
        (status = 200, description = "Token pair rotated, token cookies set", body = JsonApiResponse<JsonApiResource<AuthTokenResource>>),
        (status = 401, description = "Missing, invalid or superseded refresh token", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn refresh_token(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    // an unreadable body carries no token
    let presented = match jar.get(REFRESH_COOKIE) {
        Some(cookie) if !cookie.value().is_empty() => Some(cookie.value().to_string()),
        _ => serde_json::from_slice::<RefreshTokenRequest>(&body)
            .ok()
            .and_then(|req| req.refresh_token),
    };

    let secure = state.config.cookie_secure;
    let use_case = RefreshTokenUseCase::new(state.accounts, state.sessions, state.auth_service);

    let tokens = use_case.execute(presented).await?;
    let jar = with_token_cookies(jar, &tokens, secure);
    let resource = JsonApiResource::new("auth-tokens", "session", AuthTokenResource::from(tokens));

    Ok((StatusCode::OK, jar, Json(JsonApiResponse::new(resource))))
}

/// Logout handler
#[utoipa::path(
    post,
    path = "/api/v1/users/logout",
    responses(
        (status = 200, description = "Session cleared, token cookies expired", body = JsonApiResponse<serde_json::Value>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "auth"
)]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    auth: AuthAccount,
) -> Result<impl IntoResponse, AppError> {
    LogoutUseCase::new(state.sessions)
        .execute(auth.account.id)
        .await?;

    let [access, refresh] = cleared_cookies(state.config.cookie_secure);
    let jar = jar.add(access).add(refresh);

    Ok((
        StatusCode::OK,
        jar,
        Json(JsonApiResponse::new(json!(null)).with_meta(json!({ "loggedOut": true }))),
    ))
}

/// Change password handler
#[utoipa::path(
    post,
    path = "/api/v1/users/change-password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = JsonApiResponse<serde_json::Value>),
        (status = 401, description = "Unauthorized or wrong old password", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "auth"
)]
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthAccount,
    ValidatedJson(req): ValidatedJson<ChangePasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    ChangePasswordUseCase::new(state.accounts, state.password_service)
        .execute(auth.account.id, req)
        .await?;

    Ok((
        StatusCode::OK,
        Json(JsonApiResponse::new(json!(null)).with_meta(json!({ "passwordChanged": true }))),
    ))
}
