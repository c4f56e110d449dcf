//! Backend authentication adapter
//!
//! - [`gateway`] - `auth/login`, `auth/register` and `auth/refresh` calls
//! - [`claims`] - Read-only JWT payload inspection

pub mod claims;
pub mod gateway;

pub use claims::{token_expiry, token_subject};
pub use gateway::{AuthGateway, AuthResult, HttpAuthGateway};
