use crate::application::accounts::get::GetAccountUseCase;
use crate::infrastructure::state::AppState;
use crate::presentation::dtos::AccountResource;
use crate::presentation::extractors::AuthAccount;
use crate::shared::error::{AppError, ErrorResponse};
use crate::shared::response::{JsonApiResource, JsonApiResponse};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

fn account_document(resource: AccountResource) -> Json<JsonApiResponse<JsonApiResource<AccountResource>>> {
    Json(JsonApiResponse::new(JsonApiResource::new(
        "accounts",
        resource.id.to_string(),
        resource,
    )))
}

/// Profile of the authenticated account
#[utoipa::path(
    get,
    path = "/api/v1/users/current-user",
    responses(
        (status = 200, description = "Current account", body = JsonApiResponse<JsonApiResource<AccountResource>>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "accounts"
)]
pub async fn current_user(auth: AuthAccount) -> impl IntoResponse {
    (
        StatusCode::OK,
        account_document(AccountResource::from(auth.account)),
    )
}

/// Public profile lookup by handle
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_name}",
    params(
        ("user_name" = String, Path, description = "Account handle")
    ),
    responses(
        (status = 200, description = "Account found", body = JsonApiResponse<JsonApiResource<AccountResource>>),
        (status = 404, description = "Account not found", body = ErrorResponse)
    ),
    tag = "accounts"
)]
pub async fn get_account(
    State(state): State<AppState>,
    Path(user_name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let profile = GetAccountUseCase::new(state.accounts)
        .by_user_name(&user_name)
        .await?;

    Ok((
        StatusCode::OK,
        account_document(AccountResource::from(profile)),
    ))
}
