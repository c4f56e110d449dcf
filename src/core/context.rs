//! Application context
//!
//! Builds every collaborator from configuration and wires them explicitly:
//! one HTTP connection pool shared by the auth gateway and the API client,
//! one session manager injected into the request pipeline and the
//! navigator.

use crate::adapters::auth::HttpAuthGateway;
use crate::adapters::http::{build_http_client, AccessTokenSource, ApiClient};
use crate::adapters::storage::{create_store, KeyValueStore};
use crate::config::CabinetConfig;
use crate::core::navigation::{Navigator, RouteTable};
use crate::core::notification::NotificationCenter;
use crate::core::session::{SessionManager, SessionStore};
use crate::domain::Result;
use crate::services::{
    AppointmentService, ConsultationService, DashboardService, PatientService,
    PrescriptionService, ReportService, UserService,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Fully wired client core
pub struct AppContext {
    config: CabinetConfig,
    notifications: NotificationCenter,
    sessions: Arc<SessionManager>,
    api: ApiClient,
    navigator: Arc<Navigator>,
}

impl AppContext {
    /// Builds the context, opening the configured session store
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the store
    /// cannot be opened.
    pub fn from_config(config: CabinetConfig) -> Result<Self> {
        let store = create_store(&config.storage)?;
        Self::from_parts(config, store)
    }

    /// Builds the context over an existing key-value store
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_parts(config: CabinetConfig, store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let http = build_http_client(&config.api)?;
        let base_url = config.api.base_url.clone();

        let notifications =
            NotificationCenter::new(Duration::from_millis(config.notifications.duration_ms));

        let gateway = Arc::new(HttpAuthGateway::with_client(http.clone(), base_url.clone()));
        let sessions = SessionManager::new(
            gateway,
            SessionStore::new(store, &config.storage),
            config.session.timeout(),
        );

        let tokens: Arc<dyn AccessTokenSource> = sessions.clone();
        let api = ApiClient::with_client(http, base_url, tokens, notifications.clone());
        let navigator = Navigator::new(sessions.clone(), RouteTable::standard());

        tracing::debug!(
            api = %config.api.base_url,
            environment = ?config.environment,
            session_timeout_secs = config.session.timeout_seconds,
            "Application context ready"
        );

        Ok(Self {
            config,
            notifications,
            sessions,
            api,
            navigator,
        })
    }

    /// Restores a persisted session and starts following session events
    ///
    /// Returns whether a session was restored, plus the listener task that
    /// redirects the navigator on logout. Must be called inside a tokio
    /// runtime.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the session store cannot be read.
    pub fn start(&self) -> Result<(bool, JoinHandle<()>)> {
        let listener = self.navigator.spawn_session_listener();
        let restored = self.sessions.restore()?;
        if restored {
            self.navigator.navigate(crate::core::guards::DASHBOARD_PATH);
        }
        Ok((restored, listener))
    }

    pub fn config(&self) -> &CabinetConfig {
        &self.config
    }

    pub fn sessions(&self) -> &Arc<SessionManager> {
        &self.sessions
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn navigator(&self) -> &Arc<Navigator> {
        &self.navigator
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn patients(&self) -> PatientService {
        PatientService::new(self.api.clone())
    }

    pub fn consultations(&self) -> ConsultationService {
        ConsultationService::new(self.api.clone())
    }

    pub fn prescriptions(&self) -> PrescriptionService {
        PrescriptionService::new(self.api.clone())
    }

    pub fn appointments(&self) -> AppointmentService {
        AppointmentService::new(self.api.clone())
    }

    pub fn users(&self) -> UserService {
        UserService::new(self.api.clone())
    }

    pub fn reports(&self) -> ReportService {
        ReportService::new(self.api.clone())
    }

    pub fn dashboard(&self) -> DashboardService {
        DashboardService::new(self.api.clone())
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("api", &self.api)
            .field("sessions", &self.sessions)
            .field("navigator", &self.navigator)
            .finish()
    }
}
