//! Authentication guard

use super::{login_redirect, GuardDecision, RouteGuard};
use crate::core::session::SessionSnapshot;

/// Lets authenticated users through; everyone else goes to the login page
/// with the requested route as return URL
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthGuard;

impl RouteGuard for AuthGuard {
    fn check(&self, session: &SessionSnapshot, target: &str) -> GuardDecision {
        if session.is_authenticated() {
            GuardDecision::Allow
        } else {
            tracing::debug!(target_route = target, "Navigation blocked, not authenticated");
            GuardDecision::Redirect(login_redirect(target))
        }
    }
}
