//! User Name Value Object
//!
//! Public handle used for login and display. The engine only resolves
//! existing names (account creation is out of scope), so validation here
//! is about safe lookup, not registration policy.
//!
//! - ASCII letters/digits plus `_ . - +`
//! - Mixed case accepted; canonical form is lowercase
//! - NFKC normalization, then validation, then lowercasing

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Minimum length for user name (in characters)
pub const USER_NAME_MIN_LENGTH: usize = 3;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 30;

/// Allowed special characters in user name
const ALLOWED_SPECIAL_CHARS: &[char] = &['_', '.', '-', '+'];

/// User name value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserName {
    original: String,
    canonical: String,
}

impl UserName {
    /// Create a new user name with validation
    pub fn new(raw: impl Into<String>) -> AppResult<Self> {
        let normalized: String = raw.into().nfkc().collect();
        let trimmed = normalized.trim();

        let char_count = trimmed.chars().count();
        if char_count < USER_NAME_MIN_LENGTH {
            return Err(AppError::bad_request(format!(
                "User name must be at least {} characters",
                USER_NAME_MIN_LENGTH
            )));
        }
        if char_count > USER_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "User name must be at most {} characters",
                USER_NAME_MAX_LENGTH
            )));
        }

        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || ALLOWED_SPECIAL_CHARS.contains(&c))
        {
            return Err(AppError::bad_request(
                "User name may only contain letters, digits, and _ . - +",
            ));
        }

        if !trimmed.chars().any(|c| c.is_ascii_alphanumeric()) {
            return Err(AppError::bad_request(
                "User name must contain at least one letter or digit",
            ));
        }

        Ok(Self {
            original: trimmed.to_string(),
            canonical: trimmed.to_lowercase(),
        })
    }

    /// Create from a store value (assumed already validated)
    pub fn from_store(name: impl Into<String>) -> Self {
        let original = name.into();
        let canonical = original.to_lowercase();
        Self {
            original,
            canonical,
        }
    }

    /// The name as the user typed it
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Lowercase canonical form, used for lookups
    pub fn canonical(&self) -> &str {
        &self.canonical
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}
