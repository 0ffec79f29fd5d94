//! Account ID Value Object
//!
//! Accounts are keyed by a numeric id assigned by the credential store.

use kernel::id::{Id, markers};

/// Typed account id
pub type AccountId = Id<markers::Account>;
