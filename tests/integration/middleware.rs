use crate::common::{self, PASSWORD};
use axum::http::{Method, StatusCode, header};
use vidhub::infrastructure::state::AppState;

fn app_with_config(overrides: &[(&str, &str)]) -> axum::Router {
    common::app_with(AppState::in_memory(common::test_config(overrides)).unwrap())
}

#[tokio::test]
async fn test_credential_routes_are_rate_limited() {
    let app = app_with_config(&[("RATE_LIMIT_PER_MINUTE", "2")]);

    let first = common::login(&app, "alice", PASSWORD).await;
    let second = common::login(&app, "alice", PASSWORD).await;
    let third = common::login(&app, "alice", PASSWORD).await;

    assert_eq!(first.status, StatusCode::UNAUTHORIZED);
    assert_eq!(second.status, StatusCode::UNAUTHORIZED);
    assert_eq!(third.status, StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_profile_routes_are_not_rate_limited() {
    let app = app_with_config(&[("RATE_LIMIT_PER_MINUTE", "1")]);

    for _ in 0..3 {
        let response = common::send(
            &app,
            axum::http::Request::builder()
                .uri("/api/v1/users/nobody")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn test_cors_preflight_for_listed_origin() {
    let app = app_with_config(&[("CORS_ALLOWED_ORIGINS", "http://app.example.com")]);

    let request = axum::http::Request::builder()
        .uri("/api/v1/users/login")
        .method(Method::OPTIONS)
        .header(header::ORIGIN, "http://app.example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = common::send(&app, request).await;

    assert_eq!(
        response.headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://app.example.com"
    );
    assert_eq!(
        response.headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS],
        "true"
    );
}

#[tokio::test]
async fn test_cors_ignores_unlisted_origin() {
    let app = app_with_config(&[("CORS_ALLOWED_ORIGINS", "http://app.example.com")]);

    let request = axum::http::Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "http://evil.example.com")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = common::send(&app, request).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(
        response
            .headers
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}
