//! Routing and navigation
//!
//! - [`routes`] - Route table, child-path matching and the role-filtered menu
//! - [`navigator`] - Guarded navigation, return URL and logout redirects

pub mod navigator;
pub mod routes;

pub use navigator::{NavigationOutcome, Navigator};
pub use routes::{MenuItem, Resolution, Route, RouteTable};
