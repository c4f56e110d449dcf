//! Session data and lifecycle states

use crate::config::SecretString;
use crate::domain::user::{Role, User};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Lifecycle state of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No session
    Anonymous,
    /// Login or registration in flight
    Authenticating,
    /// Signed in with a usable access token
    Authenticated,
    /// Access token rejected, refresh in flight
    Refreshing,
    /// Session timeout fired; immediately followed by `Anonymous`
    Expired,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Anonymous => "anonymous",
            SessionState::Authenticating => "authenticating",
            SessionState::Authenticated => "authenticated",
            SessionState::Refreshing => "refreshing",
            SessionState::Expired => "expired",
        };
        f.write_str(name)
    }
}

/// Established session
///
/// Tokens are secrets; `Debug` output redacts them.
#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: SecretString,
    pub refresh_token: Option<SecretString>,
    pub user: User,
    /// Wall-clock instant the session timeout fires
    pub expires_at: DateTime<Utc>,
}

/// Read-only view published to observers
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub user: Option<User>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl SessionSnapshot {
    /// Snapshot with no session
    pub fn anonymous() -> Self {
        Self {
            state: SessionState::Anonymous,
            user: None,
            expires_at: None,
        }
    }

    /// True when a user is signed in, including while a refresh is running
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
            && matches!(
                self.state,
                SessionState::Authenticated | SessionState::Refreshing
            )
    }

    /// Role of the signed-in user
    pub fn role(&self) -> Option<Role> {
        if self.is_authenticated() {
            self.user.as_ref().map(|u| u.role)
        } else {
            None
        }
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self::anonymous()
    }
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutReason {
    UserRequested,
    Expired,
    RefreshFailed,
    /// Persisted session entries could not be parsed
    CorruptStorage,
}

impl fmt::Display for LogoutReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            LogoutReason::UserRequested => "user requested",
            LogoutReason::Expired => "session expired",
            LogoutReason::RefreshFailed => "token refresh failed",
            LogoutReason::CorruptStorage => "stored session unreadable",
        };
        f.write_str(reason)
    }
}

/// Discrete session lifecycle event
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Login, registration or restore established a session
    LoggedIn(User),
    /// Tokens were replaced after a 401
    Refreshed,
    /// Session ended; observers should return to the login route
    LoggedOut { reason: LogoutReason },
}
