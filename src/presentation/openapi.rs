use crate::application::auth::change_password::ChangePasswordRequest;
use crate::application::auth::login::LoginRequest;
use crate::application::auth::refresh::RefreshTokenRequest;
use crate::application::auth::register::RegisterRequest;
use crate::presentation::dtos::{AccountResource, AuthTokenResource};
use crate::shared::error::{ErrorResponse, JsonApiError};
use crate::shared::response::{JsonApiResource, JsonApiResponse};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Vidhub Account API",
        version = "0.1.0",
        description = "Account registration and session management for the video platform.\n\nTokens are delivered as HTTP-only cookies; the access token may also be sent as a Bearer header.",
    ),
    paths(
        crate::presentation::handlers::auth::register,
        crate::presentation::handlers::auth::login,
        crate::presentation::handlers::auth::refresh_token,
        crate::presentation::handlers::auth::logout,
        crate::presentation::handlers::auth::change_password,
        crate::presentation::handlers::accounts::current_user,
        crate::presentation::handlers::accounts::get_account,
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            RefreshTokenRequest,
            ChangePasswordRequest,
            AccountResource,
            AuthTokenResource,
            JsonApiResource<AccountResource>,
            JsonApiResource<AuthTokenResource>,
            JsonApiResponse<JsonApiResource<AccountResource>>,
            JsonApiResponse<JsonApiResource<AuthTokenResource>>,
            JsonApiResponse<serde_json::Value>,
            ErrorResponse,
            JsonApiError,
        )
    ),
    tags(
        (name = "auth", description = "Registration, login, token refresh and logout"),
        (name = "accounts", description = "Account profiles")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
            components.add_security_scheme(
                "cookie_auth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("accessToken"))),
            );
        }
    }
}
