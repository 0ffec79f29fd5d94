//! Caller context
//!
//! Identifies who is calling an engine operation. Built by the transport
//! boundary and passed explicitly into every call; the engine never reads
//! request state from ambient/global storage.

use std::net::IpAddr;

/// Context describing the caller of an engine operation
///
/// Used for the audit trail. All fields are optional: internal jobs and
/// tests call the engine without a transport behind them.
#[derive(Debug, Clone, Default)]
pub struct CallerContext {
    /// Client IP address as seen by the boundary
    pub ip_address: Option<IpAddr>,
    /// User-Agent string as sent by the client
    pub user_agent: Option<String>,
    /// Account id of an already-authenticated caller, if any
    pub authenticated_account_id: Option<i64>,
}

impl CallerContext {
    /// Context for an unauthenticated request
    pub fn new(ip_address: Option<IpAddr>, user_agent: Option<String>) -> Self {
        Self {
            ip_address,
            user_agent,
            authenticated_account_id: None,
        }
    }

    /// Context with no transport behind it (jobs, tests)
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// IP rendered for the audit log
    pub fn ip_string(&self) -> String {
        self.ip_address
            .map(|ip| ip.to_string())
            .unwrap_or_else(|| "Unknown IP".to_string())
    }

    /// User-Agent rendered for the audit log
    pub fn user_agent_string(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| "Unknown Browser".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_context() {
        let ctx = CallerContext::anonymous();
        assert_eq!(ctx.ip_string(), "Unknown IP");
        assert_eq!(ctx.user_agent_string(), "Unknown Browser");
        assert!(ctx.authenticated_account_id.is_none());
    }

    #[test]
    fn test_context_rendering() {
        let ctx = CallerContext::new(
            Some("192.168.1.1".parse().unwrap()),
            Some("Mozilla/5.0 Test Browser".to_string()),
        );
        assert_eq!(ctx.ip_string(), "192.168.1.1");
        assert_eq!(ctx.user_agent_string(), "Mozilla/5.0 Test Browser");
    }
}
