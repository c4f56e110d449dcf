//! External system integrations for Cabinet.
//!
//! This module provides adapters for the systems the client talks to:
//!
//! - [`http`] - Generic authenticated REST client for the backend
//! - [`auth`] - Login, registration and token refresh endpoints
//! - [`storage`] - Client-side key-value store for the session entries
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies behind traits
//! ([`auth::AuthGateway`], [`storage::KeyValueStore`],
//! [`http::AccessTokenSource`]) so the session core can be exercised with
//! in-memory stores and mock servers.
//!
//! # Example
//!
//! ```rust,no_run
//! use cabinet::adapters::auth::{AuthGateway, HttpAuthGateway};
//! use cabinet::config::{secret_string, ApiConfig};
//! use cabinet::domain::Credentials;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let gateway = HttpAuthGateway::new(&ApiConfig::default())?;
//! let credentials = Credentials::new(
//!     "dr.martin@cabinet.fr",
//!     secret_string("secret-password".to_string()),
//! );
//! let response = gateway.login(&credentials).await?;
//! println!("Signed in as {}", response.user.full_name());
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod http;
pub mod storage;
