//! Login Use Case
//!
//! Authenticates an account and issues an access/refresh token pair.
//!
//! Check order: identifier resolution, lockout evaluation (permanent block,
//! auto-reactivation, running lockout, deactivation), email confirmation,
//! then password verification. Unknown identifier and wrong password both
//! answer `InvalidCredentials`.

use std::sync::Arc;

use chrono::Utc;
use platform::client::CallerContext;
use platform::password::{ClearTextPassword, HashedPassword};

use crate::application::config::AuthConfig;
use crate::application::record_audit;
use crate::application::token::TokenIssuer;
use crate::domain::entity::{Account, NewRefreshToken};
use crate::domain::lockout::{FailureAction, LockoutCheck, LockoutPolicy};
use crate::domain::repository::{AuditSeverity, AuditSink, CredentialStore, RefreshTokenStore};
use crate::domain::value_object::AccountId;
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    /// Email address or user name
    pub identifier: String,
    /// Plaintext password
    pub password: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    /// Signed access token
    pub access_token: String,
    /// Opaque refresh token
    pub refresh_token: String,
    pub account_id: AccountId,
    pub user_name: String,
    pub email: String,
}

/// Login use case
pub struct LoginUseCase<C, R, A>
where
    C: CredentialStore,
    R: RefreshTokenStore,
    A: AuditSink,
{
    accounts: Arc<C>,
    refresh_tokens: Arc<R>,
    audit: Arc<A>,
    issuer: TokenIssuer,
    config: Arc<AuthConfig>,
}

impl<C, R, A> LoginUseCase<C, R, A>
where
    C: CredentialStore,
    R: RefreshTokenStore,
    A: AuditSink,
{
    pub fn new(accounts: Arc<C>, refresh_tokens: Arc<R>, audit: Arc<A>, config: Arc<AuthConfig>) -> Self {
        Self {
            accounts,
            refresh_tokens,
            audit,
            issuer: TokenIssuer::new(config.clone()),
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput, ctx: &CallerContext) -> AuthResult<LoginOutput> {
        let account = match self.accounts.find_by_identifier(&input.identifier).await? {
            Some(account) => account,
            None => {
                record_audit(
                    self.audit.as_ref(),
                    None,
                    &format!("Login failed: {} not found", input.identifier),
                    AuditSeverity::Warning,
                    ctx,
                )
                .await;
                return Err(AuthError::InvalidCredentials);
            }
        };

        let now = Utc::now();
        match LockoutPolicy::evaluate(&account, now) {
            LockoutCheck::Blocked => return Err(AuthError::PermanentlyBlocked),
            LockoutCheck::AutoReactivate => {
                self.accounts.reactivate_after_lockout(account.id).await?;
                record_audit(
                    self.audit.as_ref(),
                    Some(account.id),
                    "Account auto-reactivated after lockout",
                    AuditSeverity::Info,
                    ctx,
                )
                .await;
                // Counter is < 5 here, so the re-evaluation is Allowed
            }
            LockoutCheck::StillLockedOut { until } => {
                return Err(AuthError::LockedOut {
                    available_at: until,
                });
            }
            LockoutCheck::Deactivated => return Err(AuthError::AccountDeactivated),
            LockoutCheck::Allowed => {}
        }

        if !account.email_confirmed {
            return Err(AuthError::EmailNotConfirmed);
        }

        if !self.verify_password(&account, input.password) {
            return self.handle_failed_password(&account, ctx).await;
        }

        if account.failed_attempts > 0 {
            self.accounts.reset_failed_attempts(account.id).await?;
        }

        // Roles are read at mint time so the token reflects the latest
        // assignment
        let roles = self.accounts.roles_for(account.id).await?;
        let access_token = self.issuer.mint_access_token(&account, roles, now)?;
        let refresh_token = self.issuer.generate_refresh_token();
        self.refresh_tokens
            .add(NewRefreshToken::issue(
                account.id,
                refresh_token.clone(),
                now,
                self.config.refresh_token_ttl,
            ))
            .await?;

        record_audit(
            self.audit.as_ref(),
            Some(account.id),
            &format!("Login successful: {}", account.email),
            AuditSeverity::Success,
            ctx,
        )
        .await;

        tracing::info!(account_id = %account.id, "Account logged in");

        Ok(LoginOutput {
            access_token,
            refresh_token,
            account_id: account.id,
            user_name: account.user_name.original().to_string(),
            email: account.email.as_str().to_string(),
        })
    }

    /// Check the presented password against the stored hash
    ///
    /// A password the policy cannot even construct, or a corrupt stored
    /// hash, counts as a failed check: both feed the failed-attempt
    /// counter rather than bypassing it.
    fn verify_password(&self, account: &Account, password: String) -> bool {
        let Ok(password) = ClearTextPassword::new(password) else {
            return false;
        };
        match HashedPassword::from_phc_string(&account.password_hash) {
            Ok(hash) => hash.verify(&password, self.config.pepper()),
            Err(_) => false,
        }
    }

    /// Apply the failed-attempt side effects, then reject
    async fn handle_failed_password(
        &self,
        account: &Account,
        ctx: &CallerContext,
    ) -> AuthResult<LoginOutput> {
        let new_count = self.accounts.increment_failed_attempts(account.id).await?;

        match LockoutPolicy::on_failure(new_count, Utc::now()) {
            FailureAction::Deactivate { lockout_until } => {
                self.accounts.deactivate(account.id, lockout_until).await?;
                record_audit(
                    self.audit.as_ref(),
                    Some(account.id),
                    "Account deactivated after 3 failed login attempts",
                    AuditSeverity::Warning,
                    ctx,
                )
                .await;
            }
            FailureAction::PermanentBlock => {
                record_audit(
                    self.audit.as_ref(),
                    Some(account.id),
                    "Account permanently blocked after 5 failed login attempts",
                    AuditSeverity::Error,
                    ctx,
                )
                .await;
            }
            FailureAction::None => {}
        }

        tracing::warn!(account_id = %account.id, failed_attempts = new_count, "Invalid login attempt");

        Err(AuthError::InvalidCredentials)
    }
}
