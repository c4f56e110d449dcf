//! Domain error types
//!
//! This module defines the error hierarchy for Cabinet. All errors are
//! domain-specific and don't expose third-party types: HTTP transport
//! failures are classified into [`ApiError`] / [`AuthError`] before they
//! leave the adapters.

use thiserror::Error;

/// Main Cabinet error type
///
/// This is the primary error type used throughout the library.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum CabinetError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// REST API errors (already classified)
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Authentication / session errors
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Client-side storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Client-side validation errors (blocks submission)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl CabinetError {
    /// Message suitable for showing to the person using the client
    pub fn user_message(&self) -> String {
        match self {
            CabinetError::Api(err) => err.user_message(),
            CabinetError::Auth(err) => err.user_message(),
            CabinetError::Validation(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

/// REST API errors
///
/// The small, fixed set of failure classes the generic API client maps
/// HTTP statuses into.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// 400, carrying the backend's message when it sent one
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// 401 that could not be recovered by a token refresh
    #[error("Not authenticated")]
    Unauthenticated,

    /// 403
    #[error("Access denied")]
    Forbidden,

    /// 404
    #[error("Resource not found")]
    NotFound,

    /// 5xx
    #[error("Server error: {status}")]
    Server { status: u16 },

    /// No HTTP response at all (DNS, refused connection, timeout)
    #[error("Cannot reach the server: {0}")]
    NetworkUnreachable(String),

    /// Any other non-success status
    #[error("Unexpected status {status}: {message}")]
    Unexpected { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// Request body or query could not be encoded
    #[error("Cannot encode request: {0}")]
    Encoding(String),
}

impl ApiError {
    /// Classify a non-success HTTP status
    ///
    /// `message` is the backend's `message` field, if the error body had one.
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        match status {
            400 => ApiError::BadRequest(message.unwrap_or_else(|| "Invalid request".to_string())),
            401 => ApiError::Unauthenticated,
            403 => ApiError::Forbidden,
            404 => ApiError::NotFound,
            500..=599 => ApiError::Server { status },
            _ => ApiError::Unexpected {
                status,
                message: message.unwrap_or_default(),
            },
        }
    }

    /// HTTP status associated with the error; `None` when no response arrived
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::BadRequest(_) => Some(400),
            ApiError::Unauthenticated => Some(401),
            ApiError::Forbidden => Some(403),
            ApiError::NotFound => Some(404),
            ApiError::Server { status } | ApiError::Unexpected { status, .. } => Some(*status),
            ApiError::NetworkUnreachable(_)
            | ApiError::InvalidResponse(_)
            | ApiError::Encoding(_) => None,
        }
    }

    /// User-facing message for toasts and CLI output
    pub fn user_message(&self) -> String {
        match self {
            ApiError::BadRequest(msg) => msg.clone(),
            ApiError::Unauthenticated => "Not authenticated".to_string(),
            ApiError::Forbidden => "Access denied".to_string(),
            ApiError::NotFound => "Resource not found".to_string(),
            ApiError::Server { .. } => "Server error, please try again later".to_string(),
            ApiError::NetworkUnreachable(_) => "Cannot reach the server".to_string(),
            ApiError::Unexpected { .. } | ApiError::InvalidResponse(_) | ApiError::Encoding(_) => {
                "An error occurred".to_string()
            }
        }
    }

    /// Whether the request pipeline raises a toast for this error
    ///
    /// Bad requests and not-found are left to the calling screen.
    pub fn is_notified(&self) -> bool {
        matches!(
            self,
            ApiError::Forbidden | ApiError::Server { .. } | ApiError::NetworkUnreachable(_)
        )
    }
}

/// Authentication and session errors
///
/// `Clone` because a single refresh outcome is shared by every request
/// waiting on it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Login rejected with 401
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Authentication endpoint answered 403
    #[error("Access denied")]
    AccessDenied,

    /// Operation requires a session and there is none
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Session has no refresh token to exchange
    #[error("No refresh token available")]
    MissingRefreshToken,

    /// Refresh token exchange was rejected
    #[error("Session refresh failed: {0}")]
    RefreshFailed(String),

    /// Authentication endpoint unreachable
    #[error("Cannot reach the server: {0}")]
    NetworkUnreachable(String),

    /// Authentication endpoint answered 5xx
    #[error("Server error: {status}")]
    Server { status: u16 },

    /// Backend refused the request with its own message (e.g. email taken)
    #[error("{0}")]
    Rejected(String),

    /// Authentication response did not match the expected shape
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),
}

impl AuthError {
    /// User-facing message for toasts and CLI output
    pub fn user_message(&self) -> String {
        match self {
            AuthError::InvalidCredentials => "Invalid credentials".to_string(),
            AuthError::AccessDenied => "Access denied".to_string(),
            AuthError::NotAuthenticated
            | AuthError::MissingRefreshToken
            | AuthError::RefreshFailed(_) => "Your session has ended, please sign in again".to_string(),
            AuthError::NetworkUnreachable(_) => "Cannot reach the server".to_string(),
            AuthError::Server { .. } => "Server error, please try again later".to_string(),
            AuthError::Rejected(msg) => msg.clone(),
            AuthError::InvalidResponse(_) => "An error occurred".to_string(),
        }
    }
}

/// Client-side key-value storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Store could not be read
    #[error("Failed to read store: {0}")]
    Read(String),

    /// Store could not be written
    #[error("Failed to write store: {0}")]
    Write(String),

    /// Store content is not a valid key-value document
    #[error("Store is corrupt: {0}")]
    Corrupt(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for CabinetError {
    fn from(err: std::io::Error) -> Self {
        CabinetError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for CabinetError {
    fn from(err: serde_json::Error) -> Self {
        CabinetError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for CabinetError {
    fn from(err: toml::de::Error) -> Self {
        CabinetError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_cabinet_error_display() {
        let err = CabinetError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test_case(400, None, ApiError::BadRequest("Invalid request".to_string()) ; "bad request without body")]
    #[test_case(400, Some("Email already used"), ApiError::BadRequest("Email already used".to_string()) ; "bad request with message")]
    #[test_case(401, None, ApiError::Unauthenticated ; "unauthenticated")]
    #[test_case(403, None, ApiError::Forbidden ; "forbidden")]
    #[test_case(404, Some("ignored"), ApiError::NotFound ; "not found")]
    #[test_case(500, None, ApiError::Server { status: 500 } ; "internal error")]
    #[test_case(503, None, ApiError::Server { status: 503 } ; "unavailable")]
    #[test_case(409, Some("conflict"), ApiError::Unexpected { status: 409, message: "conflict".to_string() } ; "other status")]
    fn test_api_error_from_status(status: u16, message: Option<&str>, expected: ApiError) {
        let err = ApiError::from_status(status, message.map(str::to_string));
        assert_eq!(err, expected);
        assert_eq!(err.status(), Some(status));
    }

    #[test_case(ApiError::Forbidden, "Access denied" ; "forbidden")]
    #[test_case(ApiError::NotFound, "Resource not found" ; "not found")]
    #[test_case(ApiError::Server { status: 502 }, "Server error, please try again later" ; "server")]
    #[test_case(ApiError::NetworkUnreachable("refused".to_string()), "Cannot reach the server" ; "network")]
    #[test_case(ApiError::Unauthenticated, "Not authenticated" ; "unauthenticated")]
    fn test_api_error_user_message(err: ApiError, expected: &str) {
        assert_eq!(err.user_message(), expected);
    }

    #[test]
    fn test_only_access_network_and_server_errors_are_notified() {
        assert!(ApiError::Forbidden.is_notified());
        assert!(ApiError::Server { status: 500 }.is_notified());
        assert!(ApiError::NetworkUnreachable("x".to_string()).is_notified());
        assert!(!ApiError::NotFound.is_notified());
        assert!(!ApiError::BadRequest("x".to_string()).is_notified());
        assert!(!ApiError::Unauthenticated.is_notified());
    }

    #[test]
    fn test_network_error_has_no_status() {
        assert_eq!(ApiError::NetworkUnreachable("dns".to_string()).status(), None);
    }

    #[test]
    fn test_api_error_conversion() {
        let cabinet_err: CabinetError = ApiError::NotFound.into();
        assert!(matches!(cabinet_err, CabinetError::Api(ApiError::NotFound)));
        assert_eq!(cabinet_err.user_message(), "Resource not found");
    }

    #[test]
    fn test_auth_error_conversion() {
        let cabinet_err: CabinetError = AuthError::InvalidCredentials.into();
        assert!(matches!(
            cabinet_err,
            CabinetError::Auth(AuthError::InvalidCredentials)
        ));
        assert_eq!(cabinet_err.user_message(), "Invalid credentials");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let cabinet_err: CabinetError = io_err.into();
        assert!(matches!(cabinet_err, CabinetError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let cabinet_err: CabinetError = json_err.into();
        assert!(matches!(cabinet_err, CabinetError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let cabinet_err: CabinetError = toml_err.into();
        assert!(matches!(cabinet_err, CabinetError::Configuration(_)));
        assert!(cabinet_err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_auth_error_is_cloneable_for_shared_outcomes() {
        let err = AuthError::RefreshFailed("401".to_string());
        let copy = err.clone();
        assert_eq!(err, copy);
        let _: &dyn std::error::Error = &copy;
    }
}
