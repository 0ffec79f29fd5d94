//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod email_confirmation;
pub mod login;
pub mod password_reset;
pub mod refresh;
pub mod token;

// Re-exports
pub use config::AuthConfig;
pub use email_confirmation::EmailConfirmationUseCase;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use password_reset::PasswordResetUseCase;
pub use refresh::{RefreshOutput, RefreshUseCase};
pub use token::{AccessClaims, TokenIssuer};

use platform::client::CallerContext;

use crate::domain::repository::{AuditSeverity, AuditSink};
use crate::domain::value_object::AccountId;

/// Write an audit entry, fire-and-forget
///
/// A failed audit write must never abort the primary operation; it is
/// surfaced through tracing instead.
pub(crate) async fn record_audit<A: AuditSink>(
    audit: &A,
    account_id: Option<AccountId>,
    action: &str,
    severity: AuditSeverity,
    ctx: &CallerContext,
) {
    if let Err(e) = audit.record(account_id, action, severity, ctx).await {
        tracing::warn!(error = %e, action = action, "Audit write failed");
    }
}
