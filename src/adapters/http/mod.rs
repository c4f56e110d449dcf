//! HTTP plumbing towards the backend REST API

pub mod client;
pub mod query;
pub mod transport;

pub use client::{AccessTokenSource, ApiClient, ApiResult};
pub use query::QueryParams;
pub use transport::{build_http_client, REQUEST_ID_HEADER};
