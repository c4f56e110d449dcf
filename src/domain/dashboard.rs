//! Dashboard summary payloads

use super::ids::ConsultationId;
use serde::{Deserialize, Serialize};

/// Headline counters shown on the dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(rename = "totalPatients", default)]
    pub total_patients: u64,
    #[serde(rename = "consultationsAujourdhui", default)]
    pub consultations_today: u64,
    #[serde(rename = "rendezVousAujourdhui", default)]
    pub appointments_today: u64,
    #[serde(rename = "prescriptionsActives", default)]
    pub active_prescriptions: u64,
    #[serde(rename = "consultationsSemaine", default)]
    pub consultations_this_week: u64,
    #[serde(rename = "nouveauxPatientsMois", default)]
    pub new_patients_this_month: u64,
}

/// Row of the "recent consultations" widget
///
/// The backend formats `dateConsultation` and `statut` for display, so they
/// stay strings here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentConsultation {
    pub id: ConsultationId,
    #[serde(rename = "patientNom")]
    pub patient_name: String,
    #[serde(rename = "medecinNom")]
    pub clinician_name: String,
    #[serde(rename = "dateConsultation")]
    pub date: String,
    #[serde(rename = "statut")]
    pub status: String,
    #[serde(rename = "motif")]
    pub reason: String,
}
