//! Appointments (calendar entries)

use super::ids::{AppointmentId, PatientId, UserId};
use super::result::Result;
use super::validation::{FormErrors, Validate};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default appointment length in minutes
pub const DEFAULT_DURATION_MINUTES: u32 = 30;

/// Appointment lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentStatus {
    #[serde(rename = "PLANIFIE")]
    Scheduled,
    #[serde(rename = "CONFIRME")]
    Confirmed,
    #[serde(rename = "ANNULE")]
    Cancelled,
    #[serde(rename = "TERMINE")]
    Completed,
    #[serde(rename = "ABSENT")]
    NoShow,
}

impl AppointmentStatus {
    /// Value the backend uses for this status
    pub fn as_wire(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "PLANIFIE",
            AppointmentStatus::Confirmed => "CONFIRME",
            AppointmentStatus::Cancelled => "ANNULE",
            AppointmentStatus::Completed => "TERMINE",
            AppointmentStatus::NoShow => "ABSENT",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::NoShow => "no-show",
        };
        f.write_str(label)
    }
}

impl FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scheduled" | "planifie" => Ok(AppointmentStatus::Scheduled),
            "confirmed" | "confirme" => Ok(AppointmentStatus::Confirmed),
            "cancelled" | "annule" => Ok(AppointmentStatus::Cancelled),
            "completed" | "termine" => Ok(AppointmentStatus::Completed),
            "no-show" | "absent" => Ok(AppointmentStatus::NoShow),
            other => Err(format!("Unknown appointment status '{other}'")),
        }
    }
}

/// Kind of visit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentKind {
    #[serde(rename = "CONSULTATION")]
    Consultation,
    #[serde(rename = "SUIVI")]
    FollowUp,
    #[serde(rename = "URGENCE")]
    Emergency,
    #[serde(rename = "BILAN")]
    Checkup,
    #[serde(rename = "AUTRE")]
    Other,
}

/// Appointment as stored by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    #[serde(rename = "patientId")]
    pub patient_id: PatientId,
    #[serde(rename = "patientNom", default)]
    pub patient_name: Option<String>,
    #[serde(rename = "medecinId")]
    pub clinician_id: UserId,
    #[serde(rename = "medecinNom", default)]
    pub clinician_name: Option<String>,
    #[serde(rename = "dateHeure")]
    pub starts_at: NaiveDateTime,
    /// Minutes
    #[serde(rename = "duree")]
    pub duration: u32,
    #[serde(rename = "type")]
    pub kind: AppointmentKind,
    #[serde(rename = "statut")]
    pub status: AppointmentStatus,
    #[serde(rename = "motif", default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(rename = "salle", default)]
    pub room: Option<String>,
    #[serde(rename = "dateCreation", default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(rename = "dateModification", default)]
    pub updated_at: Option<NaiveDateTime>,
}

impl Appointment {
    /// End of the slot
    pub fn ends_at(&self) -> NaiveDateTime {
        self.starts_at + Duration::minutes(i64::from(self.duration))
    }

    /// Whether the slot overlaps `other`'s
    pub fn overlaps(&self, other: &Appointment) -> bool {
        self.starts_at < other.ends_at() && other.starts_at < self.ends_at()
    }
}

/// Appointment form submitted on create and update
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentDraft {
    #[serde(rename = "patientId")]
    pub patient_id: Option<PatientId>,
    #[serde(rename = "medecinId", skip_serializing_if = "Option::is_none")]
    pub clinician_id: Option<UserId>,
    #[serde(rename = "dateHeure")]
    pub starts_at: Option<NaiveDateTime>,
    #[serde(rename = "duree")]
    pub duration: u32,
    #[serde(rename = "type")]
    pub kind: AppointmentKind,
    #[serde(rename = "statut")]
    pub status: AppointmentStatus,
    #[serde(rename = "motif", skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "salle", skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
}

impl Default for AppointmentDraft {
    fn default() -> Self {
        Self {
            patient_id: None,
            clinician_id: None,
            starts_at: None,
            duration: DEFAULT_DURATION_MINUTES,
            kind: AppointmentKind::Consultation,
            status: AppointmentStatus::Scheduled,
            reason: None,
            notes: None,
            room: None,
        }
    }
}

impl Validate for AppointmentDraft {
    fn validate(&self) -> Result<()> {
        let mut form = FormErrors::new();
        form.required_some("patient_id", self.patient_id.as_ref());
        form.required_some("starts_at", self.starts_at.as_ref());
        form.positive("duration", f64::from(self.duration));
        form.into_result()
    }
}

/// Body of the status change request
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StatusChange {
    #[serde(rename = "statut")]
    pub status: AppointmentStatus,
}

/// Query parameters of the appointment list
#[derive(Debug, Clone, Default, Serialize)]
pub struct AppointmentFilter {
    #[serde(rename = "patientId")]
    pub patient_id: Option<PatientId>,
    #[serde(rename = "medecinId")]
    pub clinician_id: Option<UserId>,
    #[serde(rename = "statut")]
    pub status: Option<AppointmentStatus>,
    #[serde(rename = "dateDebut")]
    pub from: Option<NaiveDate>,
    #[serde(rename = "dateFin")]
    pub to: Option<NaiveDate>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

/// Date range of the calendar view
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CalendarRange {
    #[serde(rename = "debut")]
    pub start: NaiveDate,
    #[serde(rename = "fin")]
    pub end: NaiveDate,
}
