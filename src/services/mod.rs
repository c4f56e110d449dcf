//! Feature services
//!
//! Typed wrappers translating domain calls into [`ApiClient`] requests.
//!
//! - [`resource`] - Generic CRUD over a REST collection
//! - [`patients`], [`consultations`], [`prescriptions`], [`appointments`],
//!   [`users`] - Collections with their extra calls
//! - [`reports`] - Report endpoints (opaque JSON payloads)
//! - [`dashboard`] - Dashboard widgets
//!
//! # Example
//!
//! ```rust,no_run
//! use cabinet::config::load_config;
//! use cabinet::core::AppContext;
//! use cabinet::domain::PatientFilter;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let context = AppContext::from_config(load_config("cabinet.toml")?)?;
//! let page = context
//!     .patients()
//!     .list(&PatientFilter {
//!         search: Some("dupont".to_string()),
//!         ..PatientFilter::default()
//!     })
//!     .await?;
//! println!("{} patients", page.total_elements);
//! # Ok(())
//! # }
//! ```
//!
//! [`ApiClient`]: crate::adapters::http::ApiClient

pub mod appointments;
pub mod consultations;
pub mod dashboard;
pub mod patients;
pub mod prescriptions;
pub mod reports;
pub mod resource;
pub mod users;

pub use appointments::{AppointmentService, Appointments};
pub use consultations::{ConsultationService, Consultations};
pub use dashboard::DashboardService;
pub use patients::{PatientService, Patients};
pub use prescriptions::{PrescriptionService, Prescriptions};
pub use reports::{ReportPeriod, ReportService};
pub use resource::{Resource, ResourceService};
pub use users::{UserService, Users};
