//! Core client logic for Cabinet.
//!
//! This module contains the headless application core: everything a front
//! end needs apart from rendering.
//!
//! # Modules
//!
//! - [`session`] - Authentication state machine, token refresh and expiry
//! - [`guards`] - Authentication and role guards
//! - [`navigation`] - Route table, menu and guarded navigator
//! - [`notification`] - Transient user notifications
//! - [`context`] - Wiring of all collaborators from configuration
//!
//! # Session Workflow
//!
//! 1. **Restore**: Read the persisted entries and resume the session
//! 2. **Login**: Exchange credentials for a token pair and persist it
//! 3. **Requests**: Attach the access token to every API call
//! 4. **Refresh**: On a 401, refresh once and replay the request
//! 5. **Expiry**: Sign out when the session timeout elapses
//!
//! # Example
//!
//! ```rust,no_run
//! use cabinet::config::{load_config, secret_string};
//! use cabinet::core::AppContext;
//! use cabinet::domain::Credentials;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let context = AppContext::from_config(load_config("cabinet.toml")?)?;
//! let (_restored, _listener) = context.start()?;
//!
//! let credentials = Credentials::new("admin@x.com", secret_string("password".to_string()));
//! context.sessions().login(&credentials).await?;
//! let landing = context.navigator().after_login();
//! println!("Now at {}", landing.location());
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod guards;
pub mod navigation;
pub mod notification;
pub mod session;

pub use context::AppContext;
