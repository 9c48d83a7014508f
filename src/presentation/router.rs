use crate::infrastructure::state::AppState;
use crate::presentation::handlers::{accounts, auth, health};
use crate::presentation::middleware::cors::cors_layer;
use crate::presentation::middleware::rate_limit::rate_limit_layer;
use crate::presentation::openapi::ApiDoc;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Endpoints that accept credentials or refresh tokens, rate limited per IP
fn credential_routes(state: &AppState) -> anyhow::Result<Router<AppState>> {
    Ok(Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/refresh-token", post(auth::refresh_token))
        .layer(rate_limit_layer(state.config.rate_limit_per_minute)?))
}

/// `/api/v1/users` routes
fn user_routes(state: &AppState) -> anyhow::Result<Router<AppState>> {
    Ok(Router::new()
        .merge(credential_routes(state)?)
        .route("/logout", post(auth::logout))
        .route("/change-password", post(auth::change_password))
        .route("/current-user", get(accounts::current_user))
        .route("/{user_name}", get(accounts::get_account)))
}

pub fn app(state: AppState) -> anyhow::Result<Router> {
    let cors = cors_layer(&state.config.cors_allowed_origins)?;

    Ok(Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(health::health_check))
        .nest("/api/v1/users", user_routes(&state)?)
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}
