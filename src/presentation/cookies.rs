//! Auth cookies: `accessToken` and `refreshToken`, HTTP-only and same-site strict.

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

pub const ACCESS_COOKIE: &str = "accessToken";
pub const REFRESH_COOKIE: &str = "refreshToken";

fn auth_cookie(name: &'static str, value: String, max_age: Duration, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(max_age)
        .build()
}

/// Cookie carrying the access token, `Max-Age` equal to its TTL
pub fn access_cookie(token: &str, max_age_secs: i64, secure: bool) -> Cookie<'static> {
    auth_cookie(
        ACCESS_COOKIE,
        token.to_string(),
        Duration::seconds(max_age_secs),
        secure,
    )
}

/// Cookie carrying the refresh token, `Max-Age` equal to its TTL
pub fn refresh_cookie(token: &str, max_age_secs: i64, secure: bool) -> Cookie<'static> {
    auth_cookie(
        REFRESH_COOKIE,
        token.to_string(),
        Duration::seconds(max_age_secs),
        secure,
    )
}

/// Expired replacements that make the client drop both auth cookies
pub fn cleared_cookies(secure: bool) -> [Cookie<'static>; 2] {
    [
        auth_cookie(ACCESS_COOKIE, String::new(), Duration::ZERO, secure),
        auth_cookie(REFRESH_COOKIE, String::new(), Duration::ZERO, secure),
    ]
}
