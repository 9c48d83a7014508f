use crate::domain::auth::AuthError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Detail returned for every authentication failure, whatever check failed.
pub const UNAUTHORIZED_DETAIL: &str = "Unauthorized request";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Internal server error: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

/// JSON:API error object
#[derive(Debug, Serialize, ToSchema)]
pub struct JsonApiError {
    /// HTTP status code as a string
    #[schema(example = "401")]
    pub status: String,
    #[schema(example = "Unauthorized")]
    pub title: String,
    #[schema(example = "Unauthorized request")]
    pub detail: String,
}

/// JSON:API error document
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub errors: Vec<JsonApiError>,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            errors: vec![JsonApiError {
                status: status.as_u16().to_string(),
                title: status.canonical_reason().unwrap_or("Error").to_string(),
                detail: detail.into(),
            }],
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Auth(AuthError::AccountNotFound) => StatusCode::NOT_FOUND,
            AppError::Auth(AuthError::Signing(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let detail = match self {
            AppError::ValidationError(msg) | AppError::Conflict(msg) => msg,
            AppError::Auth(AuthError::AccountNotFound) => "Account not found".to_string(),
            AppError::Auth(AuthError::Signing(e)) => {
                tracing::error!("Token signing failed: {}", e);
                "Internal server error".to_string()
            }
            AppError::Auth(kind) => {
                // the specific kind stays in the logs
                tracing::warn!("Authentication failed: {}", kind);
                UNAUTHORIZED_DETAIL.to_string()
            }
            AppError::InternalServerError(e) => {
                tracing::error!("Internal server error: {:?}", e);
                "Internal server error".to_string()
            }
        };

        (status, Json(ErrorResponse::new(status, detail))).into_response()
    }
}
