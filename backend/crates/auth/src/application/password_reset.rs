//! Password Reset Use Case
//!
//! Issues time-bounded reset tokens and consumes them exactly once.
//! A reset token is valid only while it matches the stored value exactly
//! and its expiry has not passed; every failure leaves the password hash
//! untouched.

use std::sync::Arc;

use chrono::Utc;
use platform::client::CallerContext;
use platform::crypto::constant_time_eq;
use platform::password::ClearTextPassword;
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::application::record_audit;
use crate::domain::entity::Account;
use crate::domain::repository::{AuditSeverity, AuditSink, CredentialStore, MailSender};
use crate::error::{AuthError, AuthResult};

/// Password reset use case
pub struct PasswordResetUseCase<C, M, A>
where
    C: CredentialStore,
    M: MailSender,
    A: AuditSink,
{
    accounts: Arc<C>,
    mail: Arc<M>,
    audit: Arc<A>,
    config: Arc<AuthConfig>,
}

impl<C, M, A> PasswordResetUseCase<C, M, A>
where
    C: CredentialStore,
    M: MailSender,
    A: AuditSink,
{
    pub fn new(accounts: Arc<C>, mail: Arc<M>, audit: Arc<A>, config: Arc<AuthConfig>) -> Self {
        Self {
            accounts,
            mail,
            audit,
            config,
        }
    }

    /// Issue a reset token and mail the reset link
    ///
    /// Overwrites any prior token and expiry; the expiry is
    /// `now + reset_token_ttl` (15 minutes by default).
    pub async fn forgot(&self, email: &str, ctx: &CallerContext) -> AuthResult<()> {
        let account = self
            .accounts
            .find_by_email(email)
            .await?
            .ok_or(AuthError::NotFound)?;

        let token = Uuid::new_v4().to_string();
        let expiry = Utc::now() + self.config.reset_token_ttl;
        self.accounts
            .set_reset_token(account.id, &token, expiry)
            .await?;

        let link = format!(
            "{}/auth/reset-password?email={}&token={}",
            self.config.frontend_url, account.email, token
        );
        let body =
            format!("Reset your password using this link: <a href='{link}'>{link}</a>");
        self.mail
            .send(account.email.as_str(), "Reset Your Password", &body)
            .await?;

        record_audit(
            self.audit.as_ref(),
            Some(account.id),
            "Password reset requested",
            AuditSeverity::Info,
            ctx,
        )
        .await;

        Ok(())
    }

    /// Consume a reset token and set a new password
    ///
    /// Fails with `InvalidOrExpiredToken` when the account is unknown, no
    /// token is stored, the token does not match exactly, or the expiry is
    /// absent or passed. The token is cleared after a successful reset
    /// (single use).
    pub async fn reset(
        &self,
        email: &str,
        token: &str,
        new_password: String,
        ctx: &CallerContext,
    ) -> AuthResult<()> {
        let account = match self.accounts.find_by_email(email).await? {
            Some(account) if Self::token_is_valid(&account, token) => account,
            other => {
                record_audit(
                    self.audit.as_ref(),
                    other.map(|a| a.id),
                    &format!("Password reset failed for {}: Invalid or expired token", email),
                    AuditSeverity::Warning,
                    ctx,
                )
                .await;
                return Err(AuthError::InvalidOrExpiredToken);
            }
        };

        let new_password = ClearTextPassword::new(new_password)
            .map_err(|e| AuthError::PasswordValidation(e.to_string()))?;
        let hash = new_password
            .hash(self.config.pepper())
            .map_err(|e| AuthError::Store(crate::AppError::internal(e.to_string())))?;

        self.accounts
            .update_password_hash(account.id, hash.as_phc_string())
            .await?;
        self.accounts.clear_reset_token(account.id).await?;

        record_audit(
            self.audit.as_ref(),
            Some(account.id),
            "Password reset successfully",
            AuditSeverity::Info,
            ctx,
        )
        .await;

        tracing::info!(account_id = %account.id, "Password reset");

        Ok(())
    }

    /// The full validity predicate for a presented reset token
    fn token_is_valid(account: &Account, presented: &str) -> bool {
        let Some(stored) = account
            .password_reset_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
        else {
            return false;
        };
        if !constant_time_eq(stored.as_bytes(), presented.as_bytes()) {
            return false;
        }
        match account.password_reset_expiry {
            Some(expiry) => Utc::now() <= expiry,
            None => false,
        }
    }
}
