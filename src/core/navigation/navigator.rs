//! Guarded navigation and current location

use super::routes::{normalize_path, MenuItem, Resolution, RouteTable};
use crate::core::guards::{GuardDecision, DASHBOARD_PATH, LOGIN_PATH, RETURN_URL_PARAM};
use crate::core::session::{SessionEvent, SessionManager};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use url::form_urlencoded;

/// Upper bound on chained redirects for a single navigation
const MAX_REDIRECTS: usize = 4;

/// Where a navigation request ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The requested location was entered
    Arrived(String),
    /// A guard or the route table replaced the requested location
    Redirected { requested: String, location: String },
}

impl NavigationOutcome {
    /// Location that was actually entered
    pub fn location(&self) -> &str {
        match self {
            NavigationOutcome::Arrived(location) => location,
            NavigationOutcome::Redirected { location, .. } => location,
        }
    }
}

/// Resolves navigation requests through the route table and guards
///
/// Tracks the current location on a `watch` channel and remembers the
/// return URL carried by a login redirect so a successful login lands on
/// the page that was originally requested.
pub struct Navigator {
    sessions: Arc<SessionManager>,
    routes: RouteTable,
    location: watch::Sender<String>,
    return_url: Mutex<Option<String>>,
}

impl Navigator {
    pub fn new(sessions: Arc<SessionManager>, routes: RouteTable) -> Arc<Self> {
        let (location, _) = watch::channel(LOGIN_PATH.to_string());
        Arc::new(Self {
            sessions,
            routes,
            location,
            return_url: Mutex::new(None),
        })
    }

    /// Navigates to `target`, following redirects
    pub fn navigate(&self, target: &str) -> NavigationOutcome {
        let session = self.sessions.snapshot();
        let mut current = target.to_string();

        for _ in 0..=MAX_REDIRECTS {
            let decision = match self.routes.resolve(&current) {
                Resolution::Redirect(to) => GuardDecision::Redirect(to),
                Resolution::Matched(route) => route.check(&session, &current),
            };

            match decision {
                GuardDecision::Allow => return self.arrive(target, current),
                GuardDecision::Redirect(to) => {
                    tracing::debug!(from = %current, to = %to, "Navigation redirected");
                    current = to;
                }
            }
        }

        // Redirect chain did not settle; the login page is always reachable
        tracing::warn!(requested = target, "Redirect loop, falling back to login");
        self.arrive(target, LOGIN_PATH.to_string())
    }

    fn arrive(&self, requested: &str, location: String) -> NavigationOutcome {
        if normalize_path(&location) == LOGIN_PATH {
            if let Some(return_url) = return_url_of(&location) {
                *self.lock_return_url() = Some(return_url);
            }
        }

        self.location.send_replace(location.clone());

        if location == requested {
            NavigationOutcome::Arrived(location)
        } else {
            NavigationOutcome::Redirected {
                requested: requested.to_string(),
                location,
            }
        }
    }

    /// Navigates to the remembered return URL, or the dashboard
    pub fn after_login(&self) -> NavigationOutcome {
        let target = self
            .lock_return_url()
            .take()
            .unwrap_or_else(|| DASHBOARD_PATH.to_string());
        self.navigate(&target)
    }

    /// Return URL captured from the last login redirect
    pub fn return_url(&self) -> Option<String> {
        self.lock_return_url().clone()
    }

    /// Currently entered location
    pub fn current_location(&self) -> String {
        self.location.borrow().clone()
    }

    /// Receiver following the current location
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.location.subscribe()
    }

    /// Menu entries for the current session
    pub fn menu(&self) -> Vec<MenuItem> {
        self.routes.menu(&self.sessions.snapshot())
    }

    /// Sends the navigator to the login page whenever the session ends
    ///
    /// The task stops when the navigator is dropped or the session manager
    /// goes away.
    pub fn spawn_session_listener(self: &Arc<Self>) -> JoinHandle<()> {
        let navigator = Arc::downgrade(self);
        let mut events = self.sessions.events();

        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(SessionEvent::LoggedOut { reason }) => {
                        let Some(navigator) = navigator.upgrade() else {
                            break;
                        };
                        tracing::info!(reason = %reason, "Returning to login page");
                        navigator.navigate(LOGIN_PATH);
                    }
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Session events dropped");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }

    fn lock_return_url(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.return_url.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Navigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("location", &*self.location.borrow())
            .finish()
    }
}

/// `returnUrl` of a login location, if it names an in-app path
fn return_url_of(location: &str) -> Option<String> {
    let (_, query) = location.split_once('?')?;
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == RETURN_URL_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|url| url.starts_with('/') && !url.starts_with("//"))
}
