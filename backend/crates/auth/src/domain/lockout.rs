//! Lockout Policy
//!
//! Pure decision logic over an account's failed-attempt count and lockout
//! timers. This is the single canonical policy; every call site that touches
//! the counter goes through it.
//!
//! State machine:
//! - 3 consecutive failures deactivate the account with a 2-minute lockout
//!   that auto-expires (the next login attempt reactivates it).
//! - 5 failures block the account permanently. The block is derived from the
//!   counter alone; no separate flag exists, and only an out-of-band
//!   administrative reset can clear it.

use chrono::{DateTime, Duration, Utc};

use crate::domain::entity::Account;

/// Failed attempts at which the account is deactivated with a timed lockout
pub const DEACTIVATION_THRESHOLD: u32 = 3;

/// Failed attempts at which the account is permanently blocked
pub const MAX_FAILED_ATTEMPTS: u32 = 5;

/// Lockout duration applied at the deactivation threshold
pub const LOCKOUT_MINUTES: i64 = 2;

/// Outcome of evaluating an account's lockout state before authentication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockoutCheck {
    /// Counter reached [`MAX_FAILED_ATTEMPTS`]; terminal, no state change
    Blocked,
    /// Timed lockout has elapsed; caller must reactivate via the store,
    /// then proceed as `Allowed`
    AutoReactivate,
    /// Timed lockout still in force until the carried instant
    StillLockedOut { until: DateTime<Utc> },
    /// Account is inactive for a reason other than an elapsed lockout
    Deactivated,
    /// No lockout objection; proceed to password verification
    Allowed,
}

/// Side effect required after a failed password check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureAction {
    /// Counter increment only
    None,
    /// Deactivate the account and start a timed lockout
    Deactivate { lockout_until: DateTime<Utc> },
    /// Counter reached the permanent-block threshold; the block is derived,
    /// so nothing changes beyond the counter itself
    PermanentBlock,
}

/// Progressive lockout policy
pub struct LockoutPolicy;

impl LockoutPolicy {
    /// Evaluate an account's lockout state at `now`
    ///
    /// Rules are checked in order; the first match wins.
    pub fn evaluate(account: &Account, now: DateTime<Utc>) -> LockoutCheck {
        if account.failed_attempts >= MAX_FAILED_ATTEMPTS {
            return LockoutCheck::Blocked;
        }

        if account.lockout_enabled
            && !account.active
            && account
                .lockout_until
                .is_some_and(|until| until <= now)
        {
            return LockoutCheck::AutoReactivate;
        }

        if account.lockout_enabled {
            if let Some(until) = account.lockout_until {
                if until > now {
                    return LockoutCheck::StillLockedOut { until };
                }
            }
        }

        if !account.active {
            return LockoutCheck::Deactivated;
        }

        LockoutCheck::Allowed
    }

    /// Decide the side effect for a failed password check
    ///
    /// `new_count` is the counter value after the increment.
    pub fn on_failure(new_count: u32, now: DateTime<Utc>) -> FailureAction {
        if new_count >= MAX_FAILED_ATTEMPTS {
            FailureAction::PermanentBlock
        } else if new_count == DEACTIVATION_THRESHOLD {
            FailureAction::Deactivate {
                lockout_until: now + Duration::minutes(LOCKOUT_MINUTES),
            }
        } else {
            FailureAction::None
        }
    }
}
