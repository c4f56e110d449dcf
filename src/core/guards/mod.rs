//! Route guards
//!
//! Guards decide whether a navigation may proceed given the current session
//! snapshot. They are pure: the navigator supplies the snapshot and acts on
//! the decision.
//!
//! - [`AuthGuard`] - requires a session
//! - [`RoleGuard`] - requires one of a set of roles

pub mod auth;
pub mod role;

pub use auth::AuthGuard;
pub use role::RoleGuard;

use crate::core::session::SessionSnapshot;
use url::form_urlencoded;

/// Login route
pub const LOGIN_PATH: &str = "/auth/login";

/// Landing route after login and fallback for unauthorized navigation
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Query parameter carrying the originally requested route
pub const RETURN_URL_PARAM: &str = "returnUrl";

/// Outcome of a guard check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Navigation is replaced by a navigation to this location
    Redirect(String),
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow)
    }
}

/// Check run before entering a route
pub trait RouteGuard: Send + Sync {
    /// Decides whether `target` may be entered
    fn check(&self, session: &SessionSnapshot, target: &str) -> GuardDecision;
}

/// `/auth/login?returnUrl=<target>`, percent-encoded
pub fn login_redirect(target: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(target.as_bytes()).collect();
    format!("{LOGIN_PATH}?{RETURN_URL_PARAM}={encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_redirect_encodes_target() {
        assert_eq!(
            login_redirect("/patients/42/edit"),
            "/auth/login?returnUrl=%2Fpatients%2F42%2Fedit"
        );
    }

    #[test]
    fn test_decision_is_allowed() {
        assert!(GuardDecision::Allow.is_allowed());
        assert!(!GuardDecision::Redirect(DASHBOARD_PATH.to_string()).is_allowed());
    }
}
