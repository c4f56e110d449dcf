//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Human-readable console logs on stderr
//! - Configurable log levels
//! - Local JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use cabinet::logging::init_logging;
//! use cabinet::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! // Use tracing macros for logging
//! tracing::info!("Application started");
//! tracing::error!(error = "Something went wrong", "Error occurred");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log a session state transition
///
/// # Example
///
/// ```no_run
/// use cabinet::log_session_transition;
/// use cabinet::core::session::SessionState;
///
/// log_session_transition!(SessionState::Anonymous, SessionState::Authenticated, "login");
/// ```
#[macro_export]
macro_rules! log_session_transition {
    ($from:expr, $to:expr, $cause:expr) => {
        tracing::info!(
            from = %$from,
            to = %$to,
            cause = $cause,
            "Session state changed"
        );
    };
}

/// Log a request replayed after a token refresh
///
/// # Example
///
/// ```no_run
/// use cabinet::log_request_retry;
///
/// log_request_retry!("GET", "patients/42", "access token refreshed");
/// ```
#[macro_export]
macro_rules! log_request_retry {
    ($method:expr, $endpoint:expr, $reason:expr) => {
        tracing::info!(
            method = %$method,
            endpoint = %$endpoint,
            reason = $reason,
            "Retrying request"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use cabinet::log_error_with_context;
/// use cabinet::domain::CabinetError;
///
/// let error = CabinetError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
