//! Auth Error Types
//!
//! Typed results for every engine operation. Expected authentication
//! outcomes (bad credentials, lockout, expired tokens) are ordinary enum
//! variants; hard collaborator failures travel through [`AuthError::Store`]
//! and [`AuthError::Dispatch`] so the boundary can tell them apart.

use chrono::{DateTime, Utc};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
///
/// `InvalidCredentials` is the uniform answer for both "identifier unknown"
/// and "wrong password" so callers cannot probe which accounts exist.
/// Lockout, deactivation and unconfirmed-email states are intentionally
/// distinguished to guide legitimate users.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown identifier or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Failed-attempt counter reached the permanent-block threshold
    #[error("Account permanently blocked. Please contact admin.")]
    PermanentlyBlocked,

    /// Account is temporarily locked out; carries the raw expiry instant.
    /// Rendering the instant in a timezone is the boundary's job
    /// (see `AuthConfig::format_lockout_end`).
    #[error("Account is locked out until {available_at}")]
    LockedOut { available_at: DateTime<Utc> },

    /// Account exists but is not active
    #[error("Account is deactivated")]
    AccountDeactivated,

    /// Email address has not been confirmed yet
    #[error("Please confirm your email to login")]
    EmailNotConfirmed,

    /// Refresh token unknown, expired, or already revoked
    #[error("Session expired. Please login again.")]
    SessionExpired,

    /// Refresh token points at a missing or inactive account
    #[error("Invalid user")]
    InvalidUser,

    /// Account not found (confirmation / reset flows only)
    #[error("Account not found")]
    NotFound,

    /// Password-reset token missing, mismatched, or past its expiry
    #[error("Invalid or expired password reset token")]
    InvalidOrExpiredToken,

    /// New password rejected by the password policy
    #[error("Password validation failed: {0}")]
    PasswordValidation(String),

    /// Mail dispatch failed
    #[error("Mail dispatch failed: {0}")]
    Dispatch(String),

    /// Credential / token store failure
    #[error("Store error: {0}")]
    Store(#[from] AppError),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials
            | AuthError::SessionExpired
            | AuthError::InvalidUser
            | AuthError::InvalidOrExpiredToken => ErrorKind::Unauthorized,
            AuthError::PermanentlyBlocked | AuthError::AccountDeactivated => ErrorKind::Forbidden,
            AuthError::LockedOut { .. } => ErrorKind::Locked,
            AuthError::EmailNotConfirmed => ErrorKind::UnprocessableEntity,
            AuthError::NotFound => ErrorKind::NotFound,
            AuthError::PasswordValidation(_) => ErrorKind::BadRequest,
            AuthError::Dispatch(_) => ErrorKind::BadGateway,
            AuthError::Store(err) => err.kind(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AuthError::InvalidCredentials.status_code(), 401);
        assert_eq!(AuthError::PermanentlyBlocked.status_code(), 403);
        assert_eq!(
            AuthError::LockedOut {
                available_at: Utc::now()
            }
            .status_code(),
            423
        );
        assert_eq!(AuthError::AccountDeactivated.status_code(), 403);
        assert_eq!(AuthError::EmailNotConfirmed.status_code(), 422);
        assert_eq!(AuthError::SessionExpired.status_code(), 401);
        assert_eq!(AuthError::InvalidUser.status_code(), 401);
        assert_eq!(AuthError::NotFound.status_code(), 404);
        assert_eq!(AuthError::InvalidOrExpiredToken.status_code(), 401);
        assert_eq!(
            AuthError::PasswordValidation("too short".into()).status_code(),
            400
        );
        assert_eq!(AuthError::Dispatch("smtp down".into()).status_code(), 502);
    }

    #[test]
    fn test_store_error_keeps_kind() {
        let err = AuthError::Store(AppError::service_unavailable("pool exhausted"));
        assert_eq!(err.status_code(), 503);
    }

    #[test]
    fn test_to_app_error() {
        let err = AuthError::NotFound.to_app_error();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.message(), "Account not found");
    }
}
