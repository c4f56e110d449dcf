//! HTTP transport setup and response classification
//!
//! Shared by the authentication gateway and the generic API client so both
//! use the same timeouts, TLS settings and error mapping.

use crate::config::ApiConfig;
use crate::domain::errors::{ApiError, CabinetError};
use crate::domain::result::Result;
use reqwest::{Certificate, Client, ClientBuilder};
use serde::Deserialize;
use std::time::Duration;

/// Header carrying the per-request correlation id
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Builds the `reqwest` client for the configured backend
///
/// # Errors
///
/// Returns a configuration error if the CA certificate cannot be read or
/// the client cannot be constructed.
pub fn build_http_client(config: &ApiConfig) -> Result<Client> {
    let mut client_builder = ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .user_agent(concat!("cabinet/", env!("CARGO_PKG_VERSION")));

    if let Some(ca_path) = &config.tls_ca_cert {
        let pem = std::fs::read(ca_path).map_err(|e| {
            CabinetError::Configuration(format!("Failed to read CA certificate {ca_path}: {e}"))
        })?;
        let certificate = Certificate::from_pem(&pem).map_err(|e| {
            CabinetError::Configuration(format!("Invalid CA certificate {ca_path}: {e}"))
        })?;
        client_builder = client_builder.add_root_certificate(certificate);
    }

    if !config.tls_verify {
        tracing::warn!("TLS certificate verification is disabled");
        client_builder = client_builder.danger_accept_invalid_certs(true);
    }

    client_builder
        .build()
        .map_err(|e| CabinetError::Configuration(format!("Failed to build HTTP client: {e}")))
}

/// Joins the base URL and a relative endpoint with exactly one slash
pub fn join_url(base_url: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Extracts the backend's `message` field from an error body, if any
pub fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message)
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
}

/// Classifies a transport failure (no HTTP response received)
pub fn classify_send_error(err: &reqwest::Error) -> ApiError {
    let reason = if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_connect() {
        "connection failed".to_string()
    } else {
        err.to_string()
    };
    ApiError::NetworkUnreachable(reason)
}

/// Parses a successful body, treating an empty body as JSON `null`
///
/// `null` lets endpoints without content deserialize into `()`.
pub fn parse_success_body<T: serde::de::DeserializeOwned>(
    body: &str,
) -> std::result::Result<T, ApiError> {
    let text = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(text).map_err(|e| ApiError::InvalidResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("http://localhost:8080/api", "patients", "http://localhost:8080/api/patients" ; "plain")]
    #[test_case("http://localhost:8080/api/", "patients", "http://localhost:8080/api/patients" ; "trailing slash")]
    #[test_case("http://localhost:8080/api", "/patients/4", "http://localhost:8080/api/patients/4" ; "leading slash")]
    fn test_join_url(base: &str, endpoint: &str, expected: &str) {
        assert_eq!(join_url(base, endpoint), expected);
    }

    #[test_case(r#"{"message":"Email already used"}"#, Some("Email already used") ; "message field")]
    #[test_case(r#"{"message":"  "}"#, None ; "blank message")]
    #[test_case(r#"{"error":"x"}"#, None ; "no message field")]
    #[test_case("<html>bad gateway</html>", None ; "not json")]
    fn test_error_message(body: &str, expected: Option<&str>) {
        assert_eq!(error_message(body).as_deref(), expected);
    }

    #[test]
    fn test_empty_success_body_is_unit() {
        let unit: std::result::Result<(), _> = parse_success_body("");
        assert!(unit.is_ok());
        let value: serde_json::Value = parse_success_body(" ").unwrap();
        assert!(value.is_null());
    }

    #[test]
    fn test_malformed_success_body() {
        let result: std::result::Result<Vec<u32>, _> = parse_success_body("{oops");
        assert!(matches!(result, Err(ApiError::InvalidResponse(_))));
    }

    #[test]
    fn test_build_client_with_defaults() {
        assert!(build_http_client(&ApiConfig::default()).is_ok());
    }

    #[test]
    fn test_build_client_missing_ca_file() {
        let config = ApiConfig {
            tls_ca_cert: Some("/nonexistent/ca.pem".to_string()),
            ..ApiConfig::default()
        };
        let err = build_http_client(&config).unwrap_err();
        assert!(err.to_string().contains("CA certificate"));
    }
}
