//! Authentication endpoint gateway
//!
//! This module defines the `AuthGateway` trait that abstracts the backend's
//! `auth/*` endpoints, and its HTTP implementation. The session manager only
//! talks to the trait, which keeps the state machine testable without a
//! server.

use crate::adapters::http::transport::{
    build_http_client, error_message, join_url, REQUEST_ID_HEADER,
};
use crate::config::{ApiConfig, SecretString};
use crate::domain::errors::AuthError;
use crate::domain::user::{AuthResponse, Credentials, RegistrationRequest};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::fmt;

/// Result type for authentication calls
pub type AuthResult<T> = std::result::Result<T, AuthError>;

/// Trait for the backend's authentication endpoints
///
/// # Example
///
/// ```no_run
/// use cabinet::adapters::auth::{AuthGateway, HttpAuthGateway};
/// use cabinet::config::{secret_string, ApiConfig};
/// use cabinet::domain::Credentials;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let gateway = HttpAuthGateway::new(&ApiConfig::default())?;
/// let credentials = Credentials::new("admin@x.com", secret_string("password".to_string()));
/// let response = gateway.login(&credentials).await?;
/// println!("Signed in as {}", response.user.email);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchanges credentials for a token pair (`POST auth/login`)
    ///
    /// # Errors
    ///
    /// - `InvalidCredentials` on 401
    /// - `AccessDenied` on 403
    /// - `Server` on 5xx
    /// - `NetworkUnreachable` when no response arrives
    /// - `Rejected` with the backend message for anything else
    async fn login(&self, credentials: &Credentials) -> AuthResult<AuthResponse>;

    /// Creates an account and signs it in (`POST auth/register`)
    ///
    /// # Errors
    ///
    /// Same classification as [`AuthGateway::login`].
    async fn register(&self, request: &RegistrationRequest) -> AuthResult<AuthResponse>;

    /// Exchanges a refresh token for a new token pair (`POST auth/refresh`)
    ///
    /// # Errors
    ///
    /// `RefreshFailed` for any non-success status, `NetworkUnreachable` when
    /// no response arrives.
    async fn refresh(&self, refresh_token: &SecretString) -> AuthResult<AuthResponse>;
}

#[derive(Serialize)]
struct RefreshBody<'a> {
    #[serde(rename = "refreshToken")]
    refresh_token: &'a SecretString,
}

/// `AuthGateway` over HTTP with `reqwest`
#[derive(Clone)]
pub struct HttpAuthGateway {
    client: Client,
    base_url: String,
}

impl fmt::Debug for HttpAuthGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpAuthGateway")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl HttpAuthGateway {
    /// Creates a gateway with its own HTTP client
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> crate::domain::Result<Self> {
        Ok(Self::with_client(
            build_http_client(config)?,
            config.base_url.clone(),
        ))
    }

    /// Creates a gateway sharing an existing HTTP client
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn post_auth<B: Serialize + Sync + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> AuthResult<(StatusCode, String)> {
        let url = join_url(&self.base_url, endpoint);
        let request_id = uuid::Uuid::new_v4().to_string();

        tracing::debug!(url = %url, request_id = %request_id, "Calling authentication endpoint");

        let response = self
            .client
            .post(&url)
            .header(REQUEST_ID_HEADER, &request_id)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(url = %url, error = %e, "Authentication endpoint unreachable");
                AuthError::NetworkUnreachable(e.to_string())
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AuthError::NetworkUnreachable(e.to_string()))?;

        Ok((status, text))
    }
}

fn parse_auth_response(body: &str) -> AuthResult<AuthResponse> {
    serde_json::from_str(body).map_err(|e| AuthError::InvalidResponse(e.to_string()))
}

/// Maps a failed login/register response to its error class
fn classify_sign_in_failure(status: StatusCode, body: &str) -> AuthError {
    match status {
        StatusCode::UNAUTHORIZED => AuthError::InvalidCredentials,
        StatusCode::FORBIDDEN => AuthError::AccessDenied,
        s if s.is_server_error() => AuthError::Server { status: s.as_u16() },
        _ => AuthError::Rejected(
            error_message(body).unwrap_or_else(|| "Invalid request".to_string()),
        ),
    }
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn login(&self, credentials: &Credentials) -> AuthResult<AuthResponse> {
        let (status, body) = self.post_auth("auth/login", credentials).await?;
        if !status.is_success() {
            tracing::info!(status = status.as_u16(), "Login rejected");
            return Err(classify_sign_in_failure(status, &body));
        }
        parse_auth_response(&body)
    }

    async fn register(&self, request: &RegistrationRequest) -> AuthResult<AuthResponse> {
        let (status, body) = self.post_auth("auth/register", request).await?;
        if !status.is_success() {
            tracing::info!(status = status.as_u16(), "Registration rejected");
            return Err(classify_sign_in_failure(status, &body));
        }
        parse_auth_response(&body)
    }

    async fn refresh(&self, refresh_token: &SecretString) -> AuthResult<AuthResponse> {
        let body = RefreshBody { refresh_token };
        let (status, text) = self.post_auth("auth/refresh", &body).await?;
        if !status.is_success() {
            return Err(AuthError::RefreshFailed(format!(
                "refresh endpoint answered {}",
                status.as_u16()
            )));
        }
        parse_auth_response(&text).map_err(|e| AuthError::RefreshFailed(e.to_string()))
    }
}
