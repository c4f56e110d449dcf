//! Generic REST client
//!
//! Every feature service goes through [`ApiClient`]. It resolves endpoints
//! against the configured base URL, attaches the bearer token and a request
//! id, classifies failures into [`ApiError`] and, on a 401, asks the token
//! source for a refreshed token and replays the request exactly once.

use super::query::QueryParams;
use super::transport::{
    build_http_client, classify_send_error, error_message, join_url, parse_success_body,
    REQUEST_ID_HEADER,
};
use crate::config::{bearer_header, ApiConfig, SecretString};
use crate::core::notification::NotificationCenter;
use crate::domain::errors::{ApiError, AuthError};
use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Result type for API calls
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Supplies access tokens to the request pipeline
///
/// Implemented by the session manager. Kept as a trait so the client can
/// be exercised against a fixed token in tests.
#[async_trait]
pub trait AccessTokenSource: Send + Sync {
    /// Token to attach to the next request, if signed in
    fn access_token(&self) -> Option<SecretString>;

    /// Obtains a usable token after `rejected` received a 401
    ///
    /// Implementations must coalesce concurrent calls into a single refresh
    /// and must return the current token without refreshing when it already
    /// differs from `rejected`.
    async fn refresh_after_unauthorized(
        &self,
        rejected: &SecretString,
    ) -> std::result::Result<SecretString, AuthError>;
}

/// Authenticated JSON client for the backend REST API
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    tokens: Arc<dyn AccessTokenSource>,
    notifications: NotificationCenter,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

struct PreparedRequest<'a> {
    method: Method,
    endpoint: &'a str,
    query: QueryParams,
    body: Option<Value>,
}

impl ApiClient {
    /// Creates a client with its own HTTP connection pool
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(
        config: &ApiConfig,
        tokens: Arc<dyn AccessTokenSource>,
        notifications: NotificationCenter,
    ) -> crate::domain::Result<Self> {
        Ok(Self::with_client(
            build_http_client(config)?,
            config.base_url.clone(),
            tokens,
            notifications,
        ))
    }

    /// Creates a client over an existing `reqwest::Client`
    pub fn with_client(
        http: Client,
        base_url: impl Into<String>,
        tokens: Arc<dyn AccessTokenSource>,
        notifications: NotificationCenter,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            tokens,
            notifications,
        }
    }

    /// Base URL every endpoint is resolved against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET {base}/{endpoint}`
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`] of the final attempt.
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        self.execute(PreparedRequest {
            method: Method::GET,
            endpoint,
            query: QueryParams::new(),
            body: None,
        })
        .await
    }

    /// `GET {base}/{endpoint}?{query}`, absent query fields omitted
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Encoding`] if `query` is not a flat object, else
    /// the classified error of the final attempt.
    pub async fn get_with_query<T, Q>(&self, endpoint: &str, query: &Q) -> ApiResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let query = QueryParams::from_serialize(query)?;
        self.get_with_params(endpoint, query).await
    }

    /// `GET {base}/{endpoint}?{params}` with prebuilt parameters
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`] of the final attempt.
    pub async fn get_with_params<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: QueryParams,
    ) -> ApiResult<T> {
        self.execute(PreparedRequest {
            method: Method::GET,
            endpoint,
            query: params,
            body: None,
        })
        .await
    }

    /// `POST {base}/{endpoint}` with a JSON body
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`] of the final attempt.
    pub async fn post<T, B>(&self, endpoint: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(Method::POST, endpoint, body).await
    }

    /// `PUT {base}/{endpoint}` with a JSON body
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`] of the final attempt.
    pub async fn put<T, B>(&self, endpoint: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(Method::PUT, endpoint, body).await
    }

    /// `PATCH {base}/{endpoint}` with a JSON body
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`] of the final attempt.
    pub async fn patch<T, B>(&self, endpoint: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(Method::PATCH, endpoint, body).await
    }

    /// `DELETE {base}/{endpoint}`
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`] of the final attempt.
    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        self.execute(PreparedRequest {
            method: Method::DELETE,
            endpoint,
            query: QueryParams::new(),
            body: None,
        })
        .await
    }

    async fn send_json<T, B>(&self, method: Method, endpoint: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Encoding(e.to_string()))?;
        self.execute(PreparedRequest {
            method,
            endpoint,
            query: QueryParams::new(),
            body: Some(body),
        })
        .await
    }

    async fn execute<T: DeserializeOwned>(&self, request: PreparedRequest<'_>) -> ApiResult<T> {
        let result = self.execute_with_refresh(&request).await;

        if let Err(err) = &result {
            tracing::debug!(
                method = %request.method,
                endpoint = request.endpoint,
                error = %err,
                "API request failed"
            );
            if err.is_notified() {
                self.notifications.error(err.user_message());
            }
        }

        result
    }

    async fn execute_with_refresh<T: DeserializeOwned>(
        &self,
        request: &PreparedRequest<'_>,
    ) -> ApiResult<T> {
        let token = self.tokens.access_token();
        let (status, body) = self.send_once(request, token.as_ref()).await?;

        if status != StatusCode::UNAUTHORIZED || is_auth_endpoint(request.endpoint) {
            return classify_response(status, &body);
        }

        let Some(rejected) = token else {
            return Err(ApiError::Unauthenticated);
        };

        let fresh = match self.tokens.refresh_after_unauthorized(&rejected).await {
            Ok(fresh) => fresh,
            Err(err) => {
                crate::log_error_with_context!(&err, "Token refresh failed, request abandoned");
                return Err(ApiError::Unauthenticated);
            }
        };

        crate::log_request_retry!(request.method, request.endpoint, "access token refreshed");

        // Second 401 is final: no further refresh for this request
        let (status, body) = self.send_once(request, Some(&fresh)).await?;
        classify_response(status, &body)
    }

    async fn send_once(
        &self,
        request: &PreparedRequest<'_>,
        token: Option<&SecretString>,
    ) -> ApiResult<(StatusCode, String)> {
        let url = self.request_url(request)?;
        let request_id = uuid::Uuid::new_v4().to_string();

        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .header(REQUEST_ID_HEADER, &request_id);

        if let Some(token) = token {
            builder = builder.header(reqwest::header::AUTHORIZATION, bearer_header(token));
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        tracing::debug!(
            method = %request.method,
            endpoint = request.endpoint,
            request_id = %request_id,
            authenticated = token.is_some(),
            "Sending API request"
        );

        let response = builder.send().await.map_err(|e| classify_send_error(&e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| classify_send_error(&e))?;

        tracing::debug!(
            request_id = %request_id,
            status = status.as_u16(),
            "API response received"
        );

        Ok((status, body))
    }

    fn request_url(&self, request: &PreparedRequest<'_>) -> ApiResult<url::Url> {
        let joined = join_url(&self.base_url, request.endpoint);
        let mut url = url::Url::parse(&joined)
            .map_err(|e| ApiError::Encoding(format!("invalid URL {joined}: {e}")))?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.pairs().iter());
        }
        Ok(url)
    }
}

/// Authentication endpoints never trigger a refresh
fn is_auth_endpoint(endpoint: &str) -> bool {
    endpoint.trim_start_matches('/').starts_with("auth/")
}

fn classify_response<T: DeserializeOwned>(status: StatusCode, body: &str) -> ApiResult<T> {
    if status.is_success() {
        parse_success_body(body)
    } else {
        Err(ApiError::from_status(status.as_u16(), error_message(body)))
    }
}
