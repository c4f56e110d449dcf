//! Consultation records

use super::ids::{ConsultationId, PatientId, UserId};
use super::result::Result;
use super::validation::{FormErrors, Validate};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Consultation lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsultationStatus {
    #[serde(rename = "PLANIFIEE")]
    Planned,
    #[serde(rename = "EN_COURS")]
    InProgress,
    #[serde(rename = "TERMINEE")]
    Completed,
    #[serde(rename = "ANNULEE")]
    Cancelled,
}

impl fmt::Display for ConsultationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConsultationStatus::Planned => "planned",
            ConsultationStatus::InProgress => "in progress",
            ConsultationStatus::Completed => "completed",
            ConsultationStatus::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

/// Consultation as stored by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consultation {
    pub id: ConsultationId,
    #[serde(rename = "patientId")]
    pub patient_id: PatientId,
    #[serde(rename = "patientNom", default)]
    pub patient_name: Option<String>,
    #[serde(rename = "medecinId")]
    pub clinician_id: UserId,
    #[serde(rename = "medecinNom", default)]
    pub clinician_name: Option<String>,
    #[serde(rename = "dateConsultation")]
    pub date: NaiveDateTime,
    #[serde(rename = "motif")]
    pub reason: String,
    #[serde(rename = "symptomes", default)]
    pub symptoms: Option<String>,
    #[serde(default)]
    pub diagnostic: Option<String>,
    #[serde(rename = "traitement", default)]
    pub treatment: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(rename = "statut")]
    pub status: ConsultationStatus,
    #[serde(flatten)]
    pub vitals: Vitals,
    #[serde(rename = "dateCreation", default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(rename = "dateModification", default)]
    pub updated_at: Option<NaiveDateTime>,
}

/// Vital signs recorded during a consultation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    #[serde(rename = "tensionArterielle", default, skip_serializing_if = "Option::is_none")]
    pub blood_pressure: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(rename = "pouls", default, skip_serializing_if = "Option::is_none")]
    pub pulse: Option<u32>,
    #[serde(rename = "poids", default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(rename = "taille", default, skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
}

/// Consultation form submitted on create and update
#[derive(Debug, Clone, Serialize)]
pub struct ConsultationDraft {
    #[serde(rename = "patientId")]
    pub patient_id: Option<PatientId>,
    #[serde(rename = "medecinId", skip_serializing_if = "Option::is_none")]
    pub clinician_id: Option<UserId>,
    #[serde(rename = "dateConsultation")]
    pub date: Option<NaiveDateTime>,
    #[serde(rename = "motif")]
    pub reason: String,
    #[serde(rename = "symptomes", skip_serializing_if = "Option::is_none")]
    pub symptoms: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
    #[serde(rename = "traitement", skip_serializing_if = "Option::is_none")]
    pub treatment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "statut")]
    pub status: ConsultationStatus,
    #[serde(flatten)]
    pub vitals: Vitals,
}

impl Default for ConsultationDraft {
    fn default() -> Self {
        Self {
            patient_id: None,
            clinician_id: None,
            date: None,
            reason: String::new(),
            symptoms: None,
            diagnostic: None,
            treatment: None,
            notes: None,
            status: ConsultationStatus::Planned,
            vitals: Vitals::default(),
        }
    }
}

impl Validate for ConsultationDraft {
    fn validate(&self) -> Result<()> {
        let mut form = FormErrors::new();
        form.required_some("patient_id", self.patient_id.as_ref());
        form.required_some("date", self.date.as_ref());
        form.required("reason", &self.reason);
        if let Some(temperature) = self.vitals.temperature {
            form.positive("temperature", temperature);
        }
        if let Some(weight) = self.vitals.weight_kg {
            form.positive("weight", weight);
        }
        if let Some(height) = self.vitals.height_cm {
            form.positive("height", height);
        }
        form.into_result()
    }
}

/// Query parameters of the consultation list
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConsultationFilter {
    #[serde(rename = "patientId")]
    pub patient_id: Option<PatientId>,
    #[serde(rename = "medecinId")]
    pub clinician_id: Option<UserId>,
    #[serde(rename = "statut")]
    pub status: Option<ConsultationStatus>,
    #[serde(rename = "dateDebut")]
    pub from: Option<NaiveDate>,
    #[serde(rename = "dateFin")]
    pub to: Option<NaiveDate>,
    /// Free-text search, used by the CLI list command
    pub search: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}
