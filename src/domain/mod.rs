//! Domain models and types for Cabinet.
//!
//! This module contains the records exchanged with the practice-management
//! backend, the client-side validation rules applied before submission, and
//! the error hierarchy shared by every layer.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`PatientId`], [`AppointmentId`], [`UserId`], ...)
//! - **Records and drafts** ([`Patient`], [`Consultation`], [`Prescription`], [`Appointment`], [`User`])
//! - **Validation** ([`Validate`], [`FormErrors`])
//! - **Error types** ([`CabinetError`], [`ApiError`], [`AuthError`], [`StorageError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Identifiers are newtypes, so a patient id cannot be passed where an
//! appointment id is expected:
//!
//! ```rust
//! use cabinet::domain::{AppointmentId, PatientId};
//!
//! let patient = PatientId::new(42);
//! let appointment = AppointmentId::new(42);
//! assert_eq!(patient.get(), appointment.get());
//!
//! // This won't compile - the types differ
//! // let wrong: PatientId = appointment;
//! ```
//!
//! # Validation
//!
//! Drafts are validated client-side before any request is sent:
//!
//! ```rust
//! use cabinet::domain::{CabinetError, PatientDraft, Validate};
//!
//! let draft = PatientDraft::default();
//! assert!(matches!(draft.validate(), Err(CabinetError::Validation(_))));
//! ```

pub mod appointment;
pub mod consultation;
pub mod dashboard;
pub mod errors;
pub mod ids;
pub mod paging;
pub mod patient;
pub mod prescription;
pub mod result;
pub mod user;
pub mod validation;

// Re-export commonly used types for convenience
pub use appointment::{
    Appointment, AppointmentDraft, AppointmentFilter, AppointmentKind, AppointmentStatus,
    CalendarRange, StatusChange,
};
pub use consultation::{
    Consultation, ConsultationDraft, ConsultationFilter, ConsultationStatus, Vitals,
};
pub use dashboard::{DashboardStats, RecentConsultation};
pub use errors::{ApiError, AuthError, CabinetError, StorageError};
pub use ids::{AppointmentId, ConsultationId, PatientId, PrescriptionId, UserId};
pub use paging::{Page, SortDirection};
pub use patient::{BloodGroup, Patient, PatientDraft, PatientFilter, Sex};
pub use prescription::{
    Medication, Prescription, PrescriptionDraft, PrescriptionFilter, PrescriptionStatus,
};
pub use result::Result;
pub use user::{AuthResponse, Credentials, RegistrationRequest, Role, User, UserDraft, UserFilter};
pub use validation::{FormErrors, Validate};
