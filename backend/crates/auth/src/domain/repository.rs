//! Collaborator Contracts
//!
//! Interfaces for everything the engine does not own: the credential store,
//! the refresh-token store, outbound mail, and the audit sink. Persistence
//! and delivery are implemented outside this crate.
//!
//! Mutation happens through targeted commands that name exactly the fields
//! changed. The read-decide-write sequence around lockout counters is not
//! serialized by the engine; an implementation may serialize per account
//! (e.g. a conditional UPDATE) without changing these contracts.

use chrono::{DateTime, Utc};
use platform::client::CallerContext;

use crate::domain::entity::{Account, NewRefreshToken, RefreshToken};
use crate::domain::value_object::AccountId;
use crate::error::AuthResult;

/// Credential store contract
///
/// `find_by_identifier` accepts either an email address or a user name;
/// lookups are case-insensitive on the canonical forms.
#[trait_variant::make(CredentialStore: Send)]
pub trait LocalCredentialStore {
    /// Resolve an account by email or user name
    async fn find_by_identifier(&self, identifier: &str) -> AuthResult<Option<Account>>;

    /// Resolve an account by email
    async fn find_by_email(&self, email: &str) -> AuthResult<Option<Account>>;

    /// Resolve an account by id
    async fn find_by_id(&self, id: AccountId) -> AuthResult<Option<Account>>;

    /// Increment the failed-attempt counter, returning the new count
    async fn increment_failed_attempts(&self, id: AccountId) -> AuthResult<u32>;

    /// Reset the failed-attempt counter to zero (lockout fields untouched)
    async fn reset_failed_attempts(&self, id: AccountId) -> AuthResult<()>;

    /// Deactivate the account and start a timed lockout
    /// (`active = false`, `lockout_enabled = true`, `lockout_until` set)
    async fn deactivate(&self, id: AccountId, lockout_until: DateTime<Utc>) -> AuthResult<()>;

    /// Reactivate after an elapsed lockout
    /// (`active = true`, `lockout_enabled = false`, `lockout_until` cleared).
    /// The failed-attempt counter is preserved: failures keep accumulating
    /// across lockouts until a successful login resets them, so the
    /// permanent block at 5 stays reachable.
    async fn reactivate_after_lockout(&self, id: AccountId) -> AuthResult<()>;

    /// Store a new email-confirmation token, overwriting any prior one
    async fn set_confirmation_token(&self, id: AccountId, token: &str) -> AuthResult<()>;

    /// Mark the email confirmed and clear the confirmation token
    async fn confirm_email(&self, id: AccountId) -> AuthResult<()>;

    /// Store a new password-reset token and expiry, overwriting any prior one
    async fn set_reset_token(
        &self,
        id: AccountId,
        token: &str,
        expiry: DateTime<Utc>,
    ) -> AuthResult<()>;

    /// Replace the password hash
    async fn update_password_hash(&self, id: AccountId, phc_hash: &str) -> AuthResult<()>;

    /// Clear the password-reset token and expiry
    async fn clear_reset_token(&self, id: AccountId) -> AuthResult<()>;

    /// Role names currently assigned to the account
    async fn roles_for(&self, id: AccountId) -> AuthResult<Vec<String>>;
}

/// Refresh token store contract
#[trait_variant::make(RefreshTokenStore: Send)]
pub trait LocalRefreshTokenStore {
    /// Persist a freshly minted token
    async fn add(&self, token: NewRefreshToken) -> AuthResult<()>;

    /// Look up a token by its opaque value
    async fn find_by_value(&self, value: &str) -> AuthResult<Option<RefreshToken>>;

    /// Revoke a token (`revoked_at = now`), recording its replacement if
    /// this is a rotation. Revoked rows are kept, never deleted.
    async fn revoke(&self, value: &str, replaced_by: Option<&str>) -> AuthResult<()>;
}

/// Outbound mail contract
///
/// Failures propagate as a dispatch error; the engine does not retry.
#[trait_variant::make(MailSender: Send)]
pub trait LocalMailSender {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> AuthResult<()>;
}

/// Severity of an audit entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditSeverity {
    Info,
    Success,
    Warning,
    Error,
}

impl AuditSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            AuditSeverity::Info => "Info",
            AuditSeverity::Success => "Success",
            AuditSeverity::Warning => "Warning",
            AuditSeverity::Error => "Error",
        }
    }
}

impl std::fmt::Display for AuditSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Audit sink contract
///
/// Fire-and-forget from the engine's perspective: a failed audit write is
/// logged and never aborts the primary operation.
#[trait_variant::make(AuditSink: Send)]
pub trait LocalAuditSink {
    async fn record(
        &self,
        account_id: Option<AccountId>,
        action: &str,
        severity: AuditSeverity,
        ctx: &CallerContext,
    ) -> AuthResult<()>;
}
