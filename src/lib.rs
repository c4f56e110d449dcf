// Cabinet - Medical Practice Administration Client
// Copyright (c) 2025 Cabinet Contributors
// Licensed under the MIT License

//! # Cabinet - Medical Practice Administration Client
//!
//! Cabinet is the client core of a medical-practice administration system.
//! It talks to the practice's REST backend on behalf of staff and patients:
//! patients, consultations, prescriptions, appointments, user accounts and
//! reporting.
//!
//! ## Overview
//!
//! This library provides:
//! - **Sessions**: login, registration, logout, persisted sessions and a
//!   fixed-length session timeout
//! - **Request pipeline**: bearer tokens on every call, one transparent
//!   token refresh on a 401 shared by all concurrent requests
//! - **Guards and navigation**: authentication and role checks in front of
//!   every screen, with return-URL handling after login
//! - **Services**: typed CRUD access to every backend collection
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Session state machine, guards, navigation, notifications
//! - [`services`] - Feature services over the REST API
//! - [`adapters`] - HTTP client, auth gateway and session storage
//! - [`domain`] - Records, identifiers, validation and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cabinet::config::{load_config, secret_string};
//! use cabinet::core::AppContext;
//! use cabinet::domain::{Credentials, PatientFilter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let context = AppContext::from_config(load_config("cabinet.toml")?)?;
//!     let (_restored, _listener) = context.start()?;
//!
//!     let password = secret_string(std::env::var("CABINET_PASSWORD")?);
//!     context
//!         .sessions()
//!         .login(&Credentials::new("doctor@practice.example", password))
//!         .await?;
//!
//!     let page = context.patients().list(&PatientFilter::default()).await?;
//!     println!("{} patients", page.total_elements);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every fallible call returns [`domain::CabinetError`], whose
//! `user_message()` is the text shown to the person using the client:
//!
//! ```rust,no_run
//! use cabinet::domain::{ApiError, CabinetError};
//!
//! fn describe(err: &CabinetError) -> String {
//!     match err {
//!         CabinetError::Api(ApiError::NotFound) => "No such record".to_string(),
//!         other => other.user_message(),
//!     }
//! }
//! ```
//!
//! ## Logging
//!
//! Cabinet uses structured logging with the `tracing` crate. Tokens never
//! appear in log output.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
pub mod services;
