//! Refresh Token Entity
//!
//! Opaque long-lived credential exchanged for a fresh access token.
//! Rotation is one-shot: a presented token is revoked before its
//! replacement is issued, and a revoked token can never be redeemed again.

use chrono::{DateTime, Utc};

use crate::domain::value_object::AccountId;

/// Refresh token record as stored
///
/// Revoked tokens are kept, not deleted; `replaced_by_token` records the
/// rotation chain and is set at most once, at revocation.
#[derive(Debug, Clone)]
pub struct RefreshToken {
    /// Store-assigned id
    pub id: i64,
    /// Owning account (lookup only, no back-pointer ownership)
    pub account_id: AccountId,
    /// Unique opaque token value
    pub token: String,
    /// Issuance timestamp
    pub created_at: DateTime<Utc>,
    /// Expiry timestamp
    pub expires_at: DateTime<Utc>,
    /// Set when the token is revoked (rotation or supersession)
    pub revoked_at: Option<DateTime<Utc>>,
    /// Token value that superseded this one, if rotated
    pub replaced_by_token: Option<String>,
}

impl RefreshToken {
    /// Whether the token's lifetime has elapsed
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Whether the token can still be redeemed
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.revoked_at.is_none() && !self.is_expired(now)
    }
}

/// Insert payload for a freshly minted refresh token
#[derive(Debug, Clone)]
pub struct NewRefreshToken {
    pub account_id: AccountId,
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl NewRefreshToken {
    /// Build an insert payload issued at `now` with the given lifetime
    pub fn issue(
        account_id: AccountId,
        token: String,
        now: DateTime<Utc>,
        ttl: chrono::Duration,
    ) -> Self {
        Self {
            account_id,
            token,
            created_at: now,
            expires_at: now + ttl,
        }
    }
}
