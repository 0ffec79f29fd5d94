//! Application Configuration

use chrono::{DateTime, Duration, FixedOffset, Utc};

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Symmetric signing key for access tokens (HS256)
    pub jwt_secret: Vec<u8>,
    /// Issuer claim stamped on and required of access tokens
    pub jwt_issuer: String,
    /// Audience claim stamped on and required of access tokens
    pub jwt_audience: String,
    /// Access token lifetime (2 hours)
    pub access_token_ttl: Duration,
    /// Refresh token lifetime (1 week)
    pub refresh_token_ttl: Duration,
    /// Password-reset token lifetime (15 minutes)
    pub reset_token_ttl: Duration,
    /// Fixed UTC offset used when rendering lockout expiries for callers.
    /// A configuration decision, not a runtime timezone lookup; default UTC.
    pub lockout_display_offset: FixedOffset,
    /// Base URL for password-reset links
    pub frontend_url: String,
    /// Base URL for email-confirmation links
    pub backend_url: String,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: vec![0u8; 32],
            jwt_issuer: "auth-engine".to_string(),
            jwt_audience: "auth-clients".to_string(),
            access_token_ttl: Duration::hours(2),
            refresh_token_ttl: Duration::days(7),
            reset_token_ttl: Duration::minutes(15),
            lockout_display_offset: FixedOffset::east_opt(0).expect("zero offset is valid"),
            frontend_url: "http://localhost:4200".to_string(),
            backend_url: "http://localhost:8080".to_string(),
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create config with a random signing key (for development)
    pub fn with_random_secret() -> Self {
        Self {
            jwt_secret: platform::crypto::random_bytes(32),
            ..Default::default()
        }
    }

    /// Create config for development
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Render a lockout expiry in the configured display offset
    ///
    /// Deterministic: same instant and config always produce the same
    /// string (`%Y-%m-%d %I:%M %p`).
    pub fn format_lockout_end(&self, instant: DateTime<Utc>) -> String {
        instant
            .with_timezone(&self.lockout_display_offset)
            .format("%Y-%m-%d %I:%M %p")
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_lifetimes() {
        let config = AuthConfig::default();
        assert_eq!(config.access_token_ttl, Duration::hours(2));
        assert_eq!(config.refresh_token_ttl, Duration::days(7));
        assert_eq!(config.reset_token_ttl, Duration::minutes(15));
    }

    #[test]
    fn test_random_secret_is_nonzero() {
        let config = AuthConfig::with_random_secret();
        assert_eq!(config.jwt_secret.len(), 32);
        assert!(config.jwt_secret.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_format_lockout_end_utc() {
        let config = AuthConfig::default();
        let instant = Utc.with_ymd_and_hms(2025, 3, 1, 13, 5, 0).unwrap();
        assert_eq!(config.format_lockout_end(instant), "2025-03-01 01:05 PM");
    }

    #[test]
    fn test_format_lockout_end_with_offset() {
        let config = AuthConfig {
            // UTC+5
            lockout_display_offset: FixedOffset::east_opt(5 * 3600).unwrap(),
            ..Default::default()
        };
        let instant = Utc.with_ymd_and_hms(2025, 3, 1, 13, 5, 0).unwrap();
        assert_eq!(config.format_lockout_end(instant), "2025-03-01 06:05 PM");
    }
}
