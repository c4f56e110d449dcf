//! Domain identifier types
//!
//! Newtype wrappers for the numeric identifiers the backend assigns to
//! records. The client never generates identifiers; these types only keep
//! a patient id from being passed where an appointment id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a server-assigned identifier
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// Returns the raw identifier
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<u64>()
                    .map(Self)
                    .map_err(|_| format!("Invalid {} '{}': expected a positive integer", $label, s))
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }
    };
}

entity_id!(
    /// Patient identifier
    ///
    /// ```
    /// use cabinet::domain::ids::PatientId;
    /// use std::str::FromStr;
    ///
    /// let id = PatientId::from_str("42").unwrap();
    /// assert_eq!(id.get(), 42);
    /// assert_eq!(id.to_string(), "42");
    /// ```
    PatientId,
    "patient id"
);

entity_id!(
    /// Consultation identifier
    ConsultationId,
    "consultation id"
);

entity_id!(
    /// Prescription identifier
    PrescriptionId,
    "prescription id"
);

entity_id!(
    /// Appointment identifier
    AppointmentId,
    "appointment id"
);

entity_id!(
    /// User (staff or patient account) identifier
    UserId,
    "user id"
);
