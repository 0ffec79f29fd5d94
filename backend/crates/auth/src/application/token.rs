//! Token Issuer
//!
//! Mints and verifies signed access tokens, and generates the opaque
//! refresh tokens they are paired with.
//!
//! - Access tokens are HS256 JWTs carrying subject id, email, username and
//!   the account's current role names. Roles are read from the credential
//!   store at mint time, never cached.
//! - Refresh tokens are 64 bytes of CSPRNG output, base64-rendered. They
//!   are capabilities with no embedded structure.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use kernel::error::app_error::AppError;
use serde::{Deserialize, Serialize};

use crate::application::config::AuthConfig;
use crate::domain::entity::Account;
use crate::error::{AuthError, AuthResult};

/// Entropy of a refresh token before encoding
const REFRESH_TOKEN_BYTES: usize = 64;

/// Claim set carried by an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject: account id
    pub sub: String,
    pub email: String,
    pub username: String,
    /// Role names at mint time
    pub roles: Vec<String>,
    pub iss: String,
    pub aud: String,
    /// Issued-at (Unix seconds)
    pub iat: i64,
    /// Expiry (Unix seconds)
    pub exp: i64,
}

/// Mints access/refresh token pairs
#[derive(Clone)]
pub struct TokenIssuer {
    config: Arc<AuthConfig>,
}

impl TokenIssuer {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    /// Mint a signed access token for the account
    ///
    /// `roles` must be the account's current role assignment, fetched from
    /// the credential store by the caller at mint time.
    pub fn mint_access_token(
        &self,
        account: &Account,
        roles: Vec<String>,
        now: DateTime<Utc>,
    ) -> AuthResult<String> {
        let claims = AccessClaims {
            sub: account.id.to_string(),
            email: account.email.as_str().to_string(),
            username: account.user_name.original().to_string(),
            roles,
            iss: self.config.jwt_issuer.clone(),
            aud: self.config.jwt_audience.clone(),
            iat: now.timestamp(),
            exp: (now + self.config.access_token_ttl).timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&self.config.jwt_secret),
        )
        .map_err(|e| {
            AuthError::Store(AppError::internal("Access token signing failed").with_source(e))
        })
    }

    /// Verify an access token and return its claims
    ///
    /// Rejects bad signatures, wrong issuer/audience, and expired tokens.
    /// An expired token maps to [`AuthError::SessionExpired`]; every other
    /// defect maps to [`AuthError::InvalidCredentials`].
    pub fn verify_access_token(&self, token: &str) -> AuthResult<AccessClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.jwt_issuer]);
        validation.set_audience(&[&self.config.jwt_audience]);

        decode::<AccessClaims>(
            token,
            &DecodingKey::from_secret(&self.config.jwt_secret),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::SessionExpired,
            _ => AuthError::InvalidCredentials,
        })
    }

    /// Generate an opaque refresh token value
    pub fn generate_refresh_token(&self) -> String {
        platform::crypto::to_base64(&platform::crypto::random_bytes(REFRESH_TOKEN_BYTES))
    }
}
