//! Refresh Use Case
//!
//! Redeems an active refresh token for a new access/refresh pair.
//!
//! Rotation is one-shot: the presented token is revoked before the
//! replacement is persisted, so a crash mid-rotation can never leave two
//! active refresh tokens behind the same predecessor, and replay of a
//! rotated token always fails.

use std::sync::Arc;

use chrono::Utc;
use platform::client::CallerContext;

use crate::application::config::AuthConfig;
use crate::application::record_audit;
use crate::application::token::TokenIssuer;
use crate::domain::entity::NewRefreshToken;
use crate::domain::repository::{AuditSeverity, AuditSink, CredentialStore, RefreshTokenStore};
use crate::error::{AuthError, AuthResult};

/// Refresh output: the new token pair
#[derive(Debug)]
pub struct RefreshOutput {
    pub access_token: String,
    pub refresh_token: String,
}

/// Refresh use case
pub struct RefreshUseCase<C, R, A>
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

impl<C, R, A> RefreshUseCase<C, R, A>
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

    pub async fn execute(
        &self,
        refresh_token: &str,
        ctx: &CallerContext,
    ) -> AuthResult<RefreshOutput> {
        let now = Utc::now();

        // Expired and revoked tokens answer identically
        let presented = self
            .refresh_tokens
            .find_by_value(refresh_token)
            .await?
            .filter(|t| t.is_active(now))
            .ok_or(AuthError::SessionExpired)?;

        let account = self
            .accounts
            .find_by_id(presented.account_id)
            .await?
            .filter(|a| a.active)
            .ok_or(AuthError::InvalidUser)?;

        // Generate the replacement value first (pure), then revoke. A revoke
        // failure aborts the whole operation: no new token is issued if the
        // old one could not be retired.
        let new_refresh = self.issuer.generate_refresh_token();
        self.refresh_tokens
            .revoke(&presented.token, Some(&new_refresh))
            .await?;

        let roles = self.accounts.roles_for(account.id).await?;
        let access_token = self.issuer.mint_access_token(&account, roles, now)?;
        self.refresh_tokens
            .add(NewRefreshToken::issue(
                account.id,
                new_refresh.clone(),
                now,
                self.config.refresh_token_ttl,
            ))
            .await?;

        record_audit(
            self.audit.as_ref(),
            Some(account.id),
            "Token refreshed",
            AuditSeverity::Info,
            ctx,
        )
        .await;

        tracing::info!(account_id = %account.id, "Refresh token rotated");

        Ok(RefreshOutput {
            access_token,
            refresh_token: new_refresh,
        })
    }
}
