//! Account Entity
//!
//! The authenticable identity record: identity, activity flags, lockout
//! state, and the confirmation/reset token fields.
//!
//! The engine treats an `Account` as an immutable snapshot read from the
//! credential store. State changes go through targeted store commands
//! (`deactivate`, `reset_failed_attempts`, ...), never by mutating a loaded
//! snapshot and writing it back.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{AccountId, Email, UserName};

/// Account snapshot as loaded from the credential store
#[derive(Debug, Clone)]
pub struct Account {
    /// Store-assigned id
    pub id: AccountId,
    /// Login/display handle
    pub user_name: UserName,
    /// Unique email address
    pub email: Email,
    /// Password hash, PHC format (opaque to the engine)
    pub password_hash: String,
    /// Whether the account may log in at all
    pub active: bool,
    /// Whether the email address has been confirmed
    pub email_confirmed: bool,
    /// Consecutive failed login attempts (0..=5)
    pub failed_attempts: u32,
    /// Whether temporary lockout bookkeeping applies
    pub lockout_enabled: bool,
    /// Lockout expiry; meaningful only while `lockout_enabled` and
    /// `failed_attempts < MAX_FAILED_ATTEMPTS`
    pub lockout_until: Option<DateTime<Utc>>,
    /// Pending email-confirmation token, if any
    pub email_confirmation_token: Option<String>,
    /// Pending password-reset token, if any
    pub password_reset_token: Option<String>,
    /// Expiry of the pending password-reset token
    pub password_reset_expiry: Option<DateTime<Utc>>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
    /// Actor that created the account (propagated, not interpreted)
    pub created_by: Option<AccountId>,
    /// Actor of the last update (propagated, not interpreted)
    pub updated_by: Option<AccountId>,
}

impl Account {
    /// Create a fresh snapshot with clean lockout and token state
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: AccountId,
        user_name: UserName,
        email: Email,
        password_hash: String,
        active: bool,
        email_confirmed: bool,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_name,
            email,
            password_hash,
            active,
            email_confirmed,
            failed_attempts: 0,
            lockout_enabled: false,
            lockout_until: None,
            email_confirmation_token: None,
            password_reset_token: None,
            password_reset_expiry: None,
            created_at: now,
            updated_at: now,
            created_by: None,
            updated_by: None,
        }
    }

    /// Whether the stored reset token is present and non-blank
    pub fn has_reset_token(&self) -> bool {
        self.password_reset_token
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty())
    }

    /// Whether the stored confirmation token is present and non-blank
    pub fn has_confirmation_token(&self) -> bool {
        self.email_confirmation_token
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        Account::new(
            AccountId::from_i64(1),
            UserName::new("alice").unwrap(),
            Email::new("alice@example.com").unwrap(),
            "$argon2id$fake".to_string(),
            true,
            true,
        )
    }

    #[test]
    fn test_new_account_has_clean_state() {
        let account = account();
        assert_eq!(account.failed_attempts, 0);
        assert!(!account.lockout_enabled);
        assert!(account.lockout_until.is_none());
        assert!(!account.has_reset_token());
        assert!(!account.has_confirmation_token());
    }

    #[test]
    fn test_blank_tokens_do_not_count() {
        let mut account = account();
        account.password_reset_token = Some("   ".to_string());
        assert!(!account.has_reset_token());

        account.password_reset_token = Some("token".to_string());
        assert!(account.has_reset_token());
    }
}
