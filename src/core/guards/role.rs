//! Role guard

use super::{login_redirect, GuardDecision, RouteGuard, DASHBOARD_PATH};
use crate::core::session::SessionSnapshot;
use crate::domain::Role;

/// Requires the signed-in user's role to be in an allow-list
///
/// An empty allow-list admits any authenticated user. Anonymous users are
/// sent to the login page; authenticated users without a listed role are
/// sent to the dashboard.
#[derive(Debug, Clone, Default)]
pub struct RoleGuard {
    allowed: Vec<Role>,
}

impl RoleGuard {
    pub fn new(allowed: impl Into<Vec<Role>>) -> Self {
        Self {
            allowed: allowed.into(),
        }
    }

    pub fn allowed(&self) -> &[Role] {
        &self.allowed
    }

    /// Whether `role` passes this guard
    pub fn permits(&self, role: Role) -> bool {
        self.allowed.is_empty() || self.allowed.contains(&role)
    }
}

impl RouteGuard for RoleGuard {
    fn check(&self, session: &SessionSnapshot, target: &str) -> GuardDecision {
        let Some(role) = session.role() else {
            return GuardDecision::Redirect(login_redirect(target));
        };

        if self.permits(role) {
            GuardDecision::Allow
        } else {
            tracing::warn!(
                target_route = target,
                role = %role,
                "Navigation blocked, role not permitted"
            );
            GuardDecision::Redirect(DASHBOARD_PATH.to_string())
        }
    }
}
