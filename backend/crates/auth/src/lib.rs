//! Auth (Authentication) Engine
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, lockout policy, collaborator contracts
//! - `application/` - Use cases, configuration, token issuing
//!
//! ## Features
//! - Login with email or username + password
//! - Progressive account lockout (temporary at 3 failures, permanent at 5)
//! - JWT access tokens + one-shot rotating opaque refresh tokens
//! - Email-confirmation and password-reset token lifecycles
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (NIST SP 800-63B compliant)
//! - Refresh tokens are 64 bytes of CSPRNG output; rotation revokes the
//!   presented token before a replacement is issued
//! - Unknown identifier and wrong password are indistinguishable to callers
//! - Every security-relevant decision is written to the audit sink

pub mod application;
pub mod domain;
pub mod error;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
}

pub mod contracts {
    pub use crate::domain::repository::*;
}
