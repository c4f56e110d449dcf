//! Route table and navigation menu

use crate::core::guards::{AuthGuard, GuardDecision, RoleGuard, RouteGuard, DASHBOARD_PATH};
use crate::core::session::SessionSnapshot;
use crate::domain::Role;
use serde::Serialize;

/// One top-level section of the application
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    /// Absolute path without trailing slash, e.g. `/patients`
    pub path: &'static str,
    pub label: &'static str,
    /// Reachable without a session
    pub public: bool,
    /// Roles admitted; empty means any authenticated user
    pub roles: &'static [Role],
    /// Listed in the navigation menu
    pub in_menu: bool,
}

impl Route {
    const fn public(path: &'static str, label: &'static str) -> Self {
        Self {
            path,
            label,
            public: true,
            roles: &[],
            in_menu: false,
        }
    }

    const fn protected(path: &'static str, label: &'static str, roles: &'static [Role]) -> Self {
        Self {
            path,
            label,
            public: false,
            roles,
            in_menu: true,
        }
    }

    /// Runs the route's guards in order; the first redirect wins
    pub fn check(&self, session: &SessionSnapshot, target: &str) -> GuardDecision {
        if self.public {
            return GuardDecision::Allow;
        }
        match AuthGuard.check(session, target) {
            GuardDecision::Allow if !self.roles.is_empty() => {
                RoleGuard::new(self.roles).check(session, target)
            }
            decision => decision,
        }
    }

    /// Whether `path` is this route or one of its children
    fn matches(&self, path: &str) -> bool {
        path == self.path
            || path
                .strip_prefix(self.path)
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

/// Result of resolving a location against the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// Location belongs to this route
    Matched(&'a Route),
    /// Location is empty or unknown and must be replaced
    Redirect(String),
}

/// Navigation menu entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub label: &'static str,
    pub path: &'static str,
}

const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// Routes of the application
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl RouteTable {
    /// The application's route table
    pub fn standard() -> Self {
        Self {
            routes: vec![
                Route::public("/auth/login", "Sign in"),
                Route::public("/auth/register", "Register"),
                Route::protected("/dashboard", "Dashboard", &[]),
                Route::protected("/patients", "Patients", &[]),
                Route::protected("/consultations", "Consultations", &[]),
                Route::protected("/prescriptions", "Prescriptions", &[]),
                Route::protected("/appointments", "Appointments", &[]),
                Route::protected("/reports", "Reports", &[]),
                Route::protected("/users", "Users", ADMIN_ONLY),
            ],
        }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Maps a location (path with optional query) to its route
    pub fn resolve(&self, location: &str) -> Resolution<'_> {
        let path = normalize_path(location);
        if path.is_empty() {
            return Resolution::Redirect(DASHBOARD_PATH.to_string());
        }

        match self.routes.iter().find(|route| route.matches(&path)) {
            Some(route) => Resolution::Matched(route),
            None => {
                tracing::debug!(location, "Unknown route, redirecting to dashboard");
                Resolution::Redirect(DASHBOARD_PATH.to_string())
            }
        }
    }

    /// Menu entries visible to the session; empty when anonymous
    pub fn menu(&self, session: &SessionSnapshot) -> Vec<MenuItem> {
        let Some(role) = session.role() else {
            return Vec::new();
        };
        self.routes
            .iter()
            .filter(|route| route.in_menu)
            .filter(|route| RoleGuard::new(route.roles).permits(role))
            .map(|route| MenuItem {
                label: route.label,
                path: route.path,
            })
            .collect()
    }
}

/// Path part of a location, with a leading slash and no trailing slash;
/// empty for the root
pub fn normalize_path(location: &str) -> String {
    let path = location
        .split(|c: char| c == '?' || c == '#')
        .next()
        .unwrap_or_default()
        .trim()
        .trim_matches('/');
    if path.is_empty() {
        String::new()
    } else {
        format!("/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::SessionState;
    use test_case::test_case;

    fn session(role: &str) -> SessionSnapshot {
        SessionSnapshot {
            state: SessionState::Authenticated,
            user: Some(
                serde_json::from_value(serde_json::json!({
                    "id": 1, "email": "a@b.fr", "nom": "A", "prenom": "B", "role": role
                }))
                .unwrap(),
            ),
            expires_at: None,
        }
    }

    #[test_case("", "/dashboard" ; "empty")]
    #[test_case("/", "/dashboard" ; "root")]
    #[test_case("/nowhere", "/dashboard" ; "unknown")]
    #[test_case("/patientsx", "/dashboard" ; "prefix without boundary")]
    fn test_redirects(location: &str, expected: &str) {
        assert_eq!(
            RouteTable::standard().resolve(location),
            Resolution::Redirect(expected.to_string())
        );
    }

    #[test_case("/patients", "/patients" ; "section")]
    #[test_case("/patients/42/edit", "/patients" ; "child path")]
    #[test_case("users/", "/users" ; "missing leading and trailing slash")]
    #[test_case("/auth/login?returnUrl=%2Fpatients", "/auth/login" ; "query ignored")]
    fn test_matches(location: &str, expected: &str) {
        let table = RouteTable::standard();
        match table.resolve(location) {
            Resolution::Matched(route) => assert_eq!(route.path, expected),
            other => panic!("expected a match, got {other:?}"),
        }
    }

    #[test]
    fn test_child_inherits_section_guard() {
        let table = RouteTable::standard();
        let Resolution::Matched(route) = table.resolve("/users/5/edit") else {
            panic!("users route missing");
        };
        assert_eq!(
            route.check(&session("MEDECIN"), "/users/5/edit"),
            GuardDecision::Redirect("/dashboard".to_string())
        );
        assert!(route.check(&session("ADMIN"), "/users/5/edit").is_allowed());
    }

    #[test]
    fn test_public_routes_need_no_session() {
        let table = RouteTable::standard();
        let Resolution::Matched(route) = table.resolve("/auth/register") else {
            panic!("register route missing");
        };
        assert!(route
            .check(&SessionSnapshot::anonymous(), "/auth/register")
            .is_allowed());
    }

    #[test]
    fn test_menu_by_role() {
        let table = RouteTable::standard();
        let admin: Vec<_> = table.menu(&session("ADMIN")).iter().map(|m| m.path).collect();
        let clinician: Vec<_> = table
            .menu(&session("MEDECIN"))
            .iter()
            .map(|m| m.path)
            .collect();

        assert_eq!(admin.len(), 7);
        assert_eq!(admin.last(), Some(&"/users"));
        assert_eq!(clinician.len(), 6);
        assert!(!clinician.contains(&"/users"));
        assert!(table.menu(&SessionSnapshot::anonymous()).is_empty());
    }
}
