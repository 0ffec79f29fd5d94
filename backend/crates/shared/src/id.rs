//! Common ID Types
//!
//! Type-safe ID wrappers for domain entities.

use std::fmt;
use std::marker::PhantomData;

/// Generic typed ID wrapper over a store-assigned numeric key
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type AccountId = Id<markers::Account>;
///
/// let id = AccountId::from_i64(42);
/// assert_eq!(id.as_i64(), 42);
/// ```
pub struct Id<T> {
    value: i64,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    /// Create from a store-assigned key
    pub const fn from_i64(value: i64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// Get the underlying key
    pub const fn as_i64(&self) -> i64 {
        self.value
    }
}

// Manual impls: derives would put bounds on T, which is only a marker.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Marker types for [`Id`]
pub mod markers {
    /// Marker for account ids
    pub struct Account;
}

#[cfg(test)]
mod tests {
    use super::*;

    type AccountId = Id<markers::Account>;

    #[test]
    fn test_roundtrip() {
        let id = AccountId::from_i64(7);
        assert_eq!(id.as_i64(), 7);
    }

    #[test]
    fn test_equality_and_ordering() {
        let a = AccountId::from_i64(1);
        let b = AccountId::from_i64(1);
        let c = AccountId::from_i64(2);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a < c);
    }

    #[test]
    fn test_display() {
        let id = AccountId::from_i64(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(format!("{:?}", id), "Id(42)");
    }
}
