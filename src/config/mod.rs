//! Configuration management for Cabinet.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! Cabinet uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `CABINET_*` environment overrides
//! - Default values for every setting
//! - Validation with descriptive messages
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use cabinet::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("cabinet.toml")?;
//!
//! println!("API: {}", config.api.base_url);
//! println!("Session timeout: {}s", config.session.timeout_seconds);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`ApiConfig`] - Backend base URL, timeouts and TLS
//! - [`SessionConfig`] - Session lifetime
//! - [`StorageConfig`] - Where the three session entries are persisted
//! - [`NotificationConfig`] - Toast durations
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! environment = "production"
//!
//! [application]
//! log_level = "info"
//!
//! [api]
//! base_url = "${CABINET_API_URL}"
//! timeout_seconds = 30
//!
//! [session]
//! timeout_seconds = 1800
//!
//! [storage]
//! backend = "file"
//! path = "/var/lib/cabinet/session.json"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_config_str};
pub use schema::{
    ApiConfig, ApplicationConfig, CabinetConfig, Environment, LoggingConfig, NotificationConfig,
    SessionConfig, StorageBackend, StorageConfig,
};
pub use secret::{
    bearer_header, secret_string, secret_string_opt, secrets_match, SecretString, SecretValue,
};
