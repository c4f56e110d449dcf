//! Configuration schema types
//!
//! This module defines the configuration structure for Cabinet. Every
//! section has defaults, so an empty `cabinet.toml` yields a client pointed
//! at a local development backend.

use serde::{Deserialize, Serialize};

/// Runtime environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    Production,
}

/// Main Cabinet configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CabinetConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: Environment,

    /// Backend REST API
    #[serde(default)]
    pub api: ApiConfig,

    /// Session lifetime
    #[serde(default)]
    pub session: SessionConfig,

    /// Where the session entries are persisted
    #[serde(default)]
    pub storage: StorageConfig,

    /// Toast notifications
    #[serde(default)]
    pub notifications: NotificationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CabinetConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.api.validate(&self.environment)?;
        self.session.validate()?;
        self.storage.validate()?;
        self.notifications.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Backend REST API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint is resolved against, e.g. `https://cabinet.example.com/api`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Connection establishment timeout in seconds
    #[serde(default = "default_connect_timeout_seconds")]
    pub connect_timeout_seconds: u64,

    /// TLS certificate verification enabled
    ///
    /// **SECURITY WARNING**: Disabling TLS verification exposes session
    /// tokens to man-in-the-middle attacks. Refused in production; use
    /// `tls_ca_cert` for a private CA instead.
    #[serde(default = "default_true")]
    pub tls_verify: bool,

    /// Optional PEM file of an additional trusted CA certificate
    #[serde(default)]
    pub tls_ca_cert: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
            connect_timeout_seconds: default_connect_timeout_seconds(),
            tls_verify: true,
            tls_ca_cert: None,
        }
    }
}

impl ApiConfig {
    fn validate(&self, environment: &Environment) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("api.base_url cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("api.base_url must start with http:// or https://".to_string());
        }

        if url::Url::parse(&self.base_url).is_err() {
            return Err(format!("api.base_url '{}' is not a valid URL", self.base_url));
        }

        if self.timeout_seconds == 0 {
            return Err("api.timeout_seconds must be > 0".to_string());
        }

        if self.connect_timeout_seconds == 0 {
            return Err("api.connect_timeout_seconds must be > 0".to_string());
        }

        // Security: Enforce TLS verification in production environments
        if *environment == Environment::Production && !self.tls_verify {
            return Err(
                "TLS certificate verification cannot be disabled in production environments. \
                Either set 'tls_verify = true' or provide a custom CA certificate using 'tls_ca_cert'. \
                For development/testing environments, set 'environment = \"development\"' or 'environment = \"staging\"'.".to_string()
            );
        }

        Ok(())
    }
}

/// Session lifetime configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Wall-clock lifetime of a session in seconds; not extended by activity
    #[serde(default = "default_session_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_session_timeout_seconds(),
        }
    }
}

impl SessionConfig {
    fn validate(&self) -> Result<(), String> {
        if self.timeout_seconds == 0 {
            return Err("session.timeout_seconds must be > 0".to_string());
        }
        Ok(())
    }

    /// Timeout as a `Duration`
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_seconds)
    }
}

/// Storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// JSON document on disk, survives restarts
    #[default]
    File,
    /// Process memory only
    Memory,
}

/// Persisted session storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend kind (file or memory)
    #[serde(default)]
    pub backend: StorageBackend,

    /// File path used by the file backend
    #[serde(default = "default_storage_path")]
    pub path: String,

    /// Key of the access token entry
    #[serde(default = "default_token_key")]
    pub token_key: String,

    /// Key of the refresh token entry
    #[serde(default = "default_refresh_token_key")]
    pub refresh_token_key: String,

    /// Key of the serialized user entry
    #[serde(default = "default_user_key")]
    pub user_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: default_storage_path(),
            token_key: default_token_key(),
            refresh_token_key: default_refresh_token_key(),
            user_key: default_user_key(),
        }
    }
}

impl StorageConfig {
    fn validate(&self) -> Result<(), String> {
        if self.backend == StorageBackend::File && self.path.trim().is_empty() {
            return Err("storage.path cannot be empty when backend = 'file'".to_string());
        }

        let keys = [&self.token_key, &self.refresh_token_key, &self.user_key];
        if keys.iter().any(|key| key.trim().is_empty()) {
            return Err("storage key names cannot be empty".to_string());
        }
        if self.token_key == self.refresh_token_key
            || self.token_key == self.user_key
            || self.refresh_token_key == self.user_key
        {
            return Err(
                "storage.token_key, storage.refresh_token_key and storage.user_key must differ"
                    .to_string(),
            );
        }

        Ok(())
    }
}

/// Toast notification configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Base display duration in milliseconds; errors are shown 1.5x longer
    #[serde(default = "default_notification_duration_ms")]
    pub duration_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_notification_duration_ms(),
        }
    }
}

impl NotificationConfig {
    fn validate(&self) -> Result<(), String> {
        if self.duration_ms == 0 {
            return Err("notifications.duration_ms must be > 0".to_string());
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled = true".to_string());
        }

        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_connect_timeout_seconds() -> u64 {
    10
}

fn default_session_timeout_seconds() -> u64 {
    1800
}

fn default_storage_path() -> String {
    ".cabinet/session.json".to_string()
}

fn default_token_key() -> String {
    "auth_token".to_string()
}

fn default_refresh_token_key() -> String {
    "refresh_token".to_string()
}

fn default_user_key() -> String {
    "current_user".to_string()
}

fn default_notification_duration_ms() -> u64 {
    4000
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
