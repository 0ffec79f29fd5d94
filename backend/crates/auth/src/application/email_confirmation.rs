//! Email Confirmation Use Case
//!
//! Sends confirmation links and consumes confirmation tokens. The stored
//! token has no expiry: it is valid until consumed or replaced by a newer
//! one.

use std::sync::Arc;

use platform::client::CallerContext;
use platform::crypto::constant_time_eq;
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::application::record_audit;
use crate::domain::repository::{AuditSeverity, AuditSink, CredentialStore, MailSender};
use crate::error::{AuthError, AuthResult};

/// Email confirmation use case
pub struct EmailConfirmationUseCase<C, M, A>
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

impl<C, M, A> EmailConfirmationUseCase<C, M, A>
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

    /// Generate a fresh confirmation token and mail the confirmation link
    ///
    /// Unconditionally overwrites any prior token; only the latest one is
    /// valid.
    pub async fn send_verification(&self, email: &str, ctx: &CallerContext) -> AuthResult<()> {
        let account = self
            .accounts
            .find_by_email(email)
            .await?
            .ok_or(AuthError::NotFound)?;

        let token = Uuid::new_v4().to_string();
        self.accounts
            .set_confirmation_token(account.id, &token)
            .await?;

        let link = format!(
            "{}/api/auth/confirm?email={}&token={}",
            self.config.backend_url, account.email, token
        );
        let body = format!(
            "<p>Please click the link below to verify your email:</p><a href=\"{link}\">{link}</a>"
        );
        self.mail
            .send(account.email.as_str(), "Confirm your email", &body)
            .await?;

        record_audit(
            self.audit.as_ref(),
            Some(account.id),
            "Verification email sent",
            AuditSeverity::Info,
            ctx,
        )
        .await;

        Ok(())
    }

    /// Consume a confirmation token
    ///
    /// Returns `Ok(false)` (not an error) when the account is unknown, no
    /// token is stored, or the token does not match. Comparison is on
    /// trimmed values, case-sensitive. On a match the token is cleared, so
    /// a second attempt with the same token answers `false`.
    pub async fn confirm(&self, email: &str, token: &str, ctx: &CallerContext) -> AuthResult<bool> {
        let Some(account) = self.accounts.find_by_email(email).await? else {
            return Ok(false);
        };

        let Some(stored) = account
            .email_confirmation_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
        else {
            return Ok(false);
        };

        if !constant_time_eq(stored.trim().as_bytes(), token.trim().as_bytes()) {
            return Ok(false);
        }

        self.accounts.confirm_email(account.id).await?;

        record_audit(
            self.audit.as_ref(),
            Some(account.id),
            "Email confirmed",
            AuditSeverity::Info,
            ctx,
        )
        .await;

        tracing::info!(account_id = %account.id, "Email confirmed");

        Ok(true)
    }
}
