use crate::domain::accounts::Account;
use crate::domain::auth::{AccessClaims, AuthError, AuthService, RefreshClaims};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

struct SigningKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SigningKeys {
    fn from_secret(secret: &str, name: &str) -> Result<Self, AuthError> {
        if secret.is_empty() {
            return Err(AuthError::Signing(format!("{} secret is empty", name)));
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        })
    }
}

/// JWT Authentication Service using HS256 with separate access and refresh secrets
pub struct JwtAuthService {
    access: SigningKeys,
    refresh: SigningKeys,
    access_token_expiry: i64,
    refresh_token_expiry: i64,
}

impl JwtAuthService {
    /// Fails with `AuthError::Signing` when a secret is empty or both secrets are equal
    pub fn new(
        access_token_secret: &str,
        refresh_token_secret: &str,
        access_token_expiry: i64,
        refresh_token_expiry: i64,
    ) -> Result<Self, AuthError> {
        if access_token_secret == refresh_token_secret {
            return Err(AuthError::Signing(
                "access and refresh secrets must differ".to_string(),
            ));
        }

        Ok(Self {
            access: SigningKeys::from_secret(access_token_secret, "access token")?,
            refresh: SigningKeys::from_secret(refresh_token_secret, "refresh token")?,
            access_token_expiry,
            refresh_token_expiry,
        })
    }

    fn sign<T: Serialize>(claims: &T, keys: &SigningKeys) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &keys.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    fn verify<T: DeserializeOwned>(token: &str, keys: &SigningKeys) -> Option<T> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        // expired means expired, no grace period
        validation.leeway = 0;

        match decode::<T>(token, &keys.decoding, &validation) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                tracing::debug!("Token rejected: {}", e);
                None
            }
        }
    }
}

impl AuthService for JwtAuthService {
    fn generate_access_token(&self, account: &Account) -> Result<String, AuthError> {
        let claims = AccessClaims::new(account, self.access_token_expiry);
        Self::sign(&claims, &self.access)
    }

    fn generate_refresh_token(&self, account_id: Uuid) -> Result<String, AuthError> {
        let claims = RefreshClaims::new(account_id, self.refresh_token_expiry);
        Self::sign(&claims, &self.refresh)
    }

    fn validate_access_token(&self, token: &str) -> Result<AccessClaims, AuthError> {
        Self::verify(token, &self.access).ok_or(AuthError::InvalidToken)
    }

    fn validate_refresh_token(&self, token: &str) -> Result<RefreshClaims, AuthError> {
        Self::verify(token, &self.refresh).ok_or(AuthError::InvalidRefreshToken)
    }

    fn access_token_expiry(&self) -> i64 {
        self.access_token_expiry
    }

    fn refresh_token_expiry(&self) -> i64 {
        self.refresh_token_expiry
    }
}
