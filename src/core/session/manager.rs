//! Session manager
//!
//! Sole owner of the session slot. Observers read the session through a
//! `watch` channel and lifecycle events through a `broadcast` channel; only
//! the methods here write it.

use super::state::{LogoutReason, Session, SessionEvent, SessionSnapshot, SessionState};
use super::store::{SessionStore, StoredSession};
use super::timer::ExpiryTimer;
use crate::adapters::auth::{AuthGateway, AuthResult};
use crate::adapters::http::AccessTokenSource;
use crate::config::{secrets_match, SecretString};
use crate::domain::errors::{AuthError, StorageError};
use crate::domain::user::{AuthResponse, Credentials, RegistrationRequest, Role, User};
use crate::domain::{Result, Validate};
use async_trait::async_trait;
use chrono::Utc;
use futures::future::{BoxFuture, FutureExt, Shared, WeakShared};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, Weak};
use std::time::Duration;
use tokio::sync::{broadcast, watch};

const EVENT_CAPACITY: usize = 32;

type RefreshFuture = BoxFuture<'static, AuthResult<SecretString>>;
type RefreshFlight = Shared<RefreshFuture>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Authentication and session lifecycle
///
/// Created behind an `Arc` so the expiry timer and the shared refresh
/// future can reach back into it without keeping it alive.
///
/// # Example
///
/// ```no_run
/// use cabinet::adapters::auth::HttpAuthGateway;
/// use cabinet::adapters::storage::MemoryStore;
/// use cabinet::config::{secret_string, CabinetConfig};
/// use cabinet::core::session::{SessionManager, SessionStore};
/// use cabinet::domain::Credentials;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = CabinetConfig::default();
/// let gateway = Arc::new(HttpAuthGateway::new(&config.api)?);
/// let store = SessionStore::new(Arc::new(MemoryStore::new()), &config.storage);
/// let sessions = SessionManager::new(gateway, store, config.session.timeout());
///
/// let credentials = Credentials::new("admin@x.com", secret_string("password".to_string()));
/// let user = sessions.login(&credentials).await?;
/// println!("Signed in as {}", user.full_name());
/// # Ok(())
/// # }
/// ```
pub struct SessionManager {
    gateway: Arc<dyn AuthGateway>,
    store: SessionStore,
    timeout: Duration,
    session: RwLock<Option<Session>>,
    /// Bumped whenever a session ends; stale refreshes and timers compare
    /// against it before touching the slot
    epoch: AtomicU64,
    refresh_flight: Mutex<Option<WeakShared<RefreshFuture>>>,
    timer: Mutex<ExpiryTimer>,
    snapshot: watch::Sender<SessionSnapshot>,
    events: broadcast::Sender<SessionEvent>,
    self_ref: Weak<SessionManager>,
}

impl SessionManager {
    /// Creates an anonymous session manager
    ///
    /// `timeout` is the fixed lifetime of every session, counted from the
    /// last login, registration, refresh or restore.
    pub fn new(gateway: Arc<dyn AuthGateway>, store: SessionStore, timeout: Duration) -> Arc<Self> {
        let (snapshot, _) = watch::channel(SessionSnapshot::anonymous());
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        Arc::new_cyclic(|self_ref| Self {
            gateway,
            store,
            timeout,
            session: RwLock::new(None),
            epoch: AtomicU64::new(0),
            refresh_flight: Mutex::new(None),
            timer: Mutex::new(ExpiryTimer::new()),
            snapshot,
            events,
            self_ref: self_ref.clone(),
        })
    }

    /// Signs in with email and password
    ///
    /// # Errors
    ///
    /// Returns a validation error before any request when the credentials
    /// are malformed, otherwise the classified [`AuthError`]. On failure no
    /// entry is stored and the previous state is kept.
    pub async fn login(&self, credentials: &Credentials) -> Result<User> {
        credentials.validate()?;

        self.set_state(SessionState::Authenticating, "login");
        let outcome = self.gateway.login(credentials).await;
        self.authenticate(outcome, "login")
    }

    /// Creates an account and signs it in
    ///
    /// # Errors
    ///
    /// Same as [`SessionManager::login`].
    pub async fn register(&self, request: &RegistrationRequest) -> Result<User> {
        request.validate()?;

        self.set_state(SessionState::Authenticating, "register");
        let outcome = self.gateway.register(request).await;
        self.authenticate(outcome, "register")
    }

    fn authenticate(&self, outcome: AuthResult<AuthResponse>, cause: &str) -> Result<User> {
        let response = match outcome {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(error = %err, cause, "Authentication failed");
                self.publish(cause);
                return Err(err.into());
            }
        };

        match self.establish(response, None, None) {
            Ok(user) => {
                tracing::info!(user_id = %user.id, role = %user.role, "User signed in");
                let _ = self.events.send(SessionEvent::LoggedIn(user.clone()));
                Ok(user)
            }
            Err(err) => {
                self.publish(cause);
                Err(err.into())
            }
        }
    }

    /// Ends the session at the user's request
    ///
    /// Valid from any state; the stored entries are always cleared.
    pub fn logout(&self) {
        self.end_session(LogoutReason::UserRequested);
    }

    /// Restores a persisted session at start-up
    ///
    /// Returns `true` when a session was restored. Unreadable user data
    /// ends the session and clears the store.
    ///
    /// # Errors
    ///
    /// Returns a storage error only if the store itself cannot be read.
    pub fn restore(&self) -> Result<bool> {
        match self.store.load()? {
            StoredSession::Empty => {
                tracing::debug!(backend = self.store.backend_name(), "No stored session");
                Ok(false)
            }
            StoredSession::Corrupt(reason) => {
                tracing::warn!(reason = %reason, "Stored session is unreadable, signing out");
                self.end_session(LogoutReason::CorruptStorage);
                Ok(false)
            }
            StoredSession::Found {
                access_token,
                refresh_token,
                user,
            } => {
                let session = self.start_session(access_token, refresh_token, user);
                let user = session.user.clone();
                {
                    let mut slot = self.write_slot();
                    *slot = Some(session);
                }
                self.arm_timer();
                self.publish("restore");
                tracing::info!(user_id = %user.id, "Session restored");
                let _ = self.events.send(SessionEvent::LoggedIn(user));
                Ok(true)
            }
        }
    }

    /// Replaces the token pair after the access token was rejected
    ///
    /// At most one refresh runs at a time; concurrent callers await the
    /// same exchange. When the current token already differs from
    /// `rejected`, no refresh is issued and the current token is returned.
    ///
    /// # Errors
    ///
    /// `NotAuthenticated` without a session, `MissingRefreshToken` when the
    /// session has none, or the gateway's refresh error. Every error except
    /// `NotAuthenticated` ends the session.
    pub async fn refresh(&self, rejected: &SecretString) -> AuthResult<SecretString> {
        let flight = {
            let mut in_flight = lock(&self.refresh_flight);

            let (current, refresh_token) = {
                let slot = self.read_slot();
                let Some(session) = slot.as_ref() else {
                    return Err(AuthError::NotAuthenticated);
                };
                (session.access_token.clone(), session.refresh_token.clone())
            };

            if !secrets_match(&current, rejected) {
                tracing::debug!("Access token already replaced, skipping refresh");
                return Ok(current);
            }

            let running = in_flight.as_ref().and_then(WeakShared::upgrade);
            match running {
                Some(running) => {
                    tracing::debug!("Joining refresh already in flight");
                    running
                }
                None => {
                    let Some(refresh_token) = refresh_token else {
                        drop(in_flight);
                        self.end_session(LogoutReason::RefreshFailed);
                        return Err(AuthError::MissingRefreshToken);
                    };
                    let flight = self.start_refresh(refresh_token);
                    *in_flight = flight.downgrade();
                    flight
                }
            }
        };

        flight.await
    }

    fn start_refresh(&self, refresh_token: SecretString) -> RefreshFlight {
        self.set_state(SessionState::Refreshing, "401 received");

        let gateway = Arc::clone(&self.gateway);
        let manager = self.self_ref.clone();
        let epoch = self.epoch.load(Ordering::SeqCst);
        let mut abandoned = AbandonedRefresh {
            manager: manager.clone(),
            armed: true,
        };

        async move {
            let _ = &abandoned;
            let outcome = gateway.refresh(&refresh_token).await;
            abandoned.armed = false;
            let Some(manager) = manager.upgrade() else {
                return Err(AuthError::NotAuthenticated);
            };
            manager.finish_refresh(outcome, refresh_token, epoch)
        }
        .boxed()
        .shared()
    }

    fn finish_refresh(
        &self,
        outcome: AuthResult<AuthResponse>,
        previous_refresh: SecretString,
        epoch: u64,
    ) -> AuthResult<SecretString> {
        let response = match outcome {
            Ok(response) => response,
            Err(err) => {
                crate::log_error_with_context!(&err, "Token refresh rejected");
                if self.epoch.load(Ordering::SeqCst) == epoch {
                    self.end_session(LogoutReason::RefreshFailed);
                }
                return Err(err);
            }
        };

        let token = response.token.clone();

        // Flight stays registered until the new tokens are in the slot
        let mut in_flight = lock(&self.refresh_flight);
        let established = self.establish(response, Some(previous_refresh), Some(epoch));
        if established.is_ok() {
            *in_flight = None;
        }
        drop(in_flight);

        match established {
            Ok(_) => {
                let _ = self.events.send(SessionEvent::Refreshed);
                Ok(token)
            }
            Err(EstablishError::Superseded) => {
                tracing::debug!("Session ended while refreshing, discarding new tokens");
                Err(AuthError::NotAuthenticated)
            }
            Err(EstablishError::Storage(err)) => {
                crate::log_error_with_context!(&err, "Cannot persist refreshed session");
                self.end_session(LogoutReason::RefreshFailed);
                Err(AuthError::RefreshFailed(err.to_string()))
            }
        }
    }

    /// Installs a new session from an authentication response
    ///
    /// With `expected_epoch`, the session is installed only if no logout
    /// happened since that epoch was read.
    fn establish(
        &self,
        response: AuthResponse,
        fallback_refresh: Option<SecretString>,
        expected_epoch: Option<u64>,
    ) -> std::result::Result<User, EstablishError> {
        let session = self.start_session(
            response.token,
            response.refresh_token.or(fallback_refresh),
            response.user,
        );
        let user = session.user.clone();

        {
            let mut slot = self.write_slot();
            if let Some(expected) = expected_epoch {
                if self.epoch.load(Ordering::SeqCst) != expected {
                    return Err(EstablishError::Superseded);
                }
            }
            if let Err(err) = self.store.save(&session) {
                if let Err(clear_err) = self.store.clear() {
                    crate::log_error_with_context!(
                        &clear_err,
                        "Failed to clear partially stored session"
                    );
                }
                return Err(EstablishError::Storage(err));
            }
            *slot = Some(session);
        }

        self.arm_timer();
        self.publish("tokens issued");
        Ok(user)
    }

    fn start_session(
        &self,
        access_token: SecretString,
        refresh_token: Option<SecretString>,
        user: User,
    ) -> Session {
        let lifetime =
            chrono::Duration::from_std(self.timeout).unwrap_or_else(|_| chrono::Duration::zero());
        Session {
            access_token,
            refresh_token,
            user,
            expires_at: Utc::now() + lifetime,
        }
    }

    fn arm_timer(&self) {
        let manager = self.self_ref.clone();
        let epoch = self.epoch.load(Ordering::SeqCst);
        lock(&self.timer).start(self.timeout, async move {
            if let Some(manager) = manager.upgrade() {
                manager.expire(epoch);
            }
        });
    }

    fn expire(&self, epoch: u64) {
        if self.epoch.load(Ordering::SeqCst) != epoch || !self.is_authenticated() {
            return;
        }
        tracing::info!("Session timeout reached");
        self.end_session(LogoutReason::Expired);
    }

    /// Clears the slot, the store and the timer, then notifies observers
    fn end_session(&self, reason: LogoutReason) {
        let had_session = {
            let mut slot = self.write_slot();
            self.epoch.fetch_add(1, Ordering::SeqCst);
            slot.take().is_some()
        };

        lock(&self.timer).cancel();
        *lock(&self.refresh_flight) = None;

        if let Err(err) = self.store.clear() {
            crate::log_error_with_context!(&err, "Failed to clear stored session");
        }

        if reason == LogoutReason::Expired {
            self.set_state(SessionState::Expired, "session timeout");
        }
        self.publish(&reason.to_string());

        if had_session {
            tracing::info!(reason = %reason, "Session ended");
        }
        let _ = self.events.send(SessionEvent::LoggedOut { reason });
    }

    /// Recomputes the published snapshot from the slot
    fn publish(&self, cause: &str) {
        let next = match self.read_slot().as_ref() {
            Some(session) => SessionSnapshot {
                state: SessionState::Authenticated,
                user: Some(session.user.clone()),
                expires_at: Some(session.expires_at),
            },
            None => SessionSnapshot::anonymous(),
        };
        self.replace_snapshot(next, cause);
    }

    /// Publishes a transient state, keeping the current user
    fn set_state(&self, state: SessionState, cause: &str) {
        let mut next = self.snapshot.borrow().clone();
        next.state = state;
        self.replace_snapshot(next, cause);
    }

    fn replace_snapshot(&self, next: SessionSnapshot, cause: &str) {
        let previous = self.snapshot.send_replace(next);
        let current = self.snapshot.borrow().state;
        if previous.state != current {
            crate::log_session_transition!(previous.state, current, cause);
        }
    }

    fn read_slot(&self) -> std::sync::RwLockReadGuard<'_, Option<Session>> {
        self.session.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_slot(&self) -> std::sync::RwLockWriteGuard<'_, Option<Session>> {
        self.session.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current snapshot
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.snapshot.borrow().state
    }

    /// Signed-in user, if any
    pub fn current_user(&self) -> Option<User> {
        self.read_slot().as_ref().map(|s| s.user.clone())
    }

    /// True while a session exists
    pub fn is_authenticated(&self) -> bool {
        self.read_slot().is_some()
    }

    /// Current access token
    pub fn access_token(&self) -> Option<SecretString> {
        self.read_slot().as_ref().map(|s| s.access_token.clone())
    }

    /// True when the signed-in user has `role`; false when anonymous
    pub fn has_role(&self, role: Role) -> bool {
        self.read_slot()
            .as_ref()
            .is_some_and(|s| s.user.role == role)
    }

    /// True when the signed-in user's role is one of `roles`
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        self.read_slot()
            .as_ref()
            .is_some_and(|s| roles.contains(&s.user.role))
    }

    /// Receiver that always holds the latest snapshot
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshot.subscribe()
    }

    /// Receiver for lifecycle events emitted from now on
    pub fn events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Session lifetime applied at every login, refresh and restore
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Republishes the session state when a refresh is dropped before the
/// gateway answered
struct AbandonedRefresh {
    manager: Weak<SessionManager>,
    armed: bool,
}

impl Drop for AbandonedRefresh {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Some(manager) = self.manager.upgrade() {
            tracing::debug!("Token refresh abandoned by every caller");
            manager.publish("refresh abandoned");
        }
    }
}

enum EstablishError {
    Superseded,
    Storage(StorageError),
}

impl From<EstablishError> for crate::domain::CabinetError {
    fn from(err: EstablishError) -> Self {
        match err {
            EstablishError::Superseded => AuthError::NotAuthenticated.into(),
            EstablishError::Storage(err) => err.into(),
        }
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("state", &self.state())
            .field("timeout", &self.timeout)
            .field("storage", &self.store.backend_name())
            .finish()
    }
}

#[async_trait]
impl AccessTokenSource for SessionManager {
    fn access_token(&self) -> Option<SecretString> {
        SessionManager::access_token(self)
    }

    async fn refresh_after_unauthorized(
        &self,
        rejected: &SecretString,
    ) -> AuthResult<SecretString> {
        self.refresh(rejected).await
    }
}
