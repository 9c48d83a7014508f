use crate::domain::auth::MAX_TOKEN_EXPIRY;
use anyhow::{Context, Result, bail};
use std::env;

/// Process configuration, read once at startup and injected through `AppState`.
#[derive(Clone)]
pub struct AppConfig {
    pub port: u16,
    /// `None` selects the in-memory account store
    pub database_url: Option<String>,
    pub access_token_secret: String,
    pub refresh_token_secret: String,
    /// Seconds
    pub access_token_expiry: i64,
    /// Seconds
    pub refresh_token_expiry: i64,
    pub cookie_secure: bool,
    pub cors_allowed_origins: Vec<String>,
    pub rate_limit_per_minute: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("access_token_secret", &"<redacted>")
            .field("refresh_token_secret", &"<redacted>")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .field("cookie_secure", &self.cookie_secure)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .finish()
    }
}

impl AppConfig {
    /// Reads configuration from environment variables.
    ///
    /// | Variable                | Default    |
    /// |-------------------------|------------|
    /// | `PORT`                  | `8000`     |
    /// | `DATABASE_URL`          | unset      |
    /// | `ACCESS_TOKEN_SECRET`   | required   |
    /// | `REFRESH_TOKEN_SECRET`  | required   |
    /// | `ACCESS_TOKEN_EXPIRY`   | `900`      |
    /// | `REFRESH_TOKEN_EXPIRY`  | `604800`   |
    /// | `COOKIE_SECURE`         | `true`     |
    /// | `CORS_ALLOWED_ORIGINS`  | empty      |
    /// | `RATE_LIMIT_PER_MINUTE` | `60`       |
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_token_secret = lookup("ACCESS_TOKEN_SECRET")
            .filter(|s| !s.is_empty())
            .context("ACCESS_TOKEN_SECRET must be set")?;
        let refresh_token_secret = lookup("REFRESH_TOKEN_SECRET")
            .filter(|s| !s.is_empty())
            .context("REFRESH_TOKEN_SECRET must be set")?;

        if access_token_secret == refresh_token_secret {
            bail!("ACCESS_TOKEN_SECRET and REFRESH_TOKEN_SECRET must differ");
        }

        let access_token_expiry = parse_or(&lookup, "ACCESS_TOKEN_EXPIRY", 900i64)?;
        let refresh_token_expiry = parse_or(&lookup, "REFRESH_TOKEN_EXPIRY", 604_800i64)?;

        if access_token_expiry <= 0 || refresh_token_expiry <= 0 {
            bail!("token expiries must be positive");
        }
        if access_token_expiry > MAX_TOKEN_EXPIRY || refresh_token_expiry > MAX_TOKEN_EXPIRY {
            bail!("token expiries must not exceed {} seconds", MAX_TOKEN_EXPIRY);
        }

        let rate_limit_per_minute = parse_or(&lookup, "RATE_LIMIT_PER_MINUTE", 60u64)?;
        if rate_limit_per_minute == 0 {
            bail!("RATE_LIMIT_PER_MINUTE must be positive");
        }

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            port: parse_or(&lookup, "PORT", 8000u16)?,
            database_url: lookup("DATABASE_URL").filter(|s| !s.is_empty()),
            access_token_secret,
            refresh_token_secret,
            access_token_expiry,
            refresh_token_expiry,
            cookie_secure: parse_or(&lookup, "COOKIE_SECURE", true)?,
            cors_allowed_origins,
            rate_limit_per_minute,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e)),
        _ => Ok(default),
    }
}
