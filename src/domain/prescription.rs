//! Prescriptions and their medication lines

use super::ids::{ConsultationId, PatientId, PrescriptionId, UserId};
use super::result::Result;
use super::validation::{FormErrors, Validate};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Prescription lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrescriptionStatus {
    #[serde(rename = "ACTIVE")]
    Active,
    #[serde(rename = "TERMINEE")]
    Completed,
    #[serde(rename = "ANNULEE")]
    Cancelled,
    #[serde(rename = "EN_ATTENTE")]
    Pending,
}

/// One medication line
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Medication {
    #[serde(rename = "nom")]
    pub name: String,
    pub dosage: String,
    #[serde(rename = "frequence")]
    pub frequency: String,
    #[serde(rename = "duree")]
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// Prescription as stored by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prescription {
    pub id: PrescriptionId,
    #[serde(rename = "consultationId", default)]
    pub consultation_id: Option<ConsultationId>,
    #[serde(rename = "patientId")]
    pub patient_id: PatientId,
    #[serde(rename = "patientNom", default)]
    pub patient_name: Option<String>,
    #[serde(rename = "medecinId")]
    pub clinician_id: UserId,
    #[serde(rename = "medecinNom", default)]
    pub clinician_name: Option<String>,
    #[serde(rename = "datePrescription")]
    pub prescribed_on: NaiveDate,
    #[serde(rename = "dateExpiration", default)]
    pub expires_on: Option<NaiveDate>,
    #[serde(rename = "medicaments", default)]
    pub medications: Vec<Medication>,
    #[serde(rename = "statut")]
    pub status: PrescriptionStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(rename = "dateCreation", default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(rename = "dateModification", default)]
    pub updated_at: Option<NaiveDateTime>,
}

impl Prescription {
    /// Whether the prescription is past its expiry date on `today`
    pub fn is_expired_on(&self, today: NaiveDate) -> bool {
        self.expires_on.is_some_and(|expiry| expiry < today)
    }
}

/// Prescription form submitted on create and update
#[derive(Debug, Clone, Serialize)]
pub struct PrescriptionDraft {
    #[serde(rename = "consultationId", skip_serializing_if = "Option::is_none")]
    pub consultation_id: Option<ConsultationId>,
    #[serde(rename = "patientId")]
    pub patient_id: Option<PatientId>,
    #[serde(rename = "datePrescription")]
    pub prescribed_on: Option<NaiveDate>,
    #[serde(rename = "dateExpiration", skip_serializing_if = "Option::is_none")]
    pub expires_on: Option<NaiveDate>,
    #[serde(rename = "medicaments")]
    pub medications: Vec<Medication>,
    #[serde(rename = "statut")]
    pub status: PrescriptionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Default for PrescriptionDraft {
    fn default() -> Self {
        Self {
            consultation_id: None,
            patient_id: None,
            prescribed_on: None,
            expires_on: None,
            medications: Vec::new(),
            status: PrescriptionStatus::Active,
            notes: None,
        }
    }
}

impl Validate for PrescriptionDraft {
    fn validate(&self) -> Result<()> {
        let mut form = FormErrors::new();
        form.required_some("patient_id", self.patient_id.as_ref());
        form.required_some("prescribed_on", self.prescribed_on.as_ref());
        if self.medications.is_empty() {
            form.push("medications", "must contain at least one medication");
        }
        for medication in &self.medications {
            form.required("medication.name", &medication.name);
            form.required("medication.dosage", &medication.dosage);
            form.required("medication.frequency", &medication.frequency);
            form.required("medication.duration", &medication.duration);
        }
        if let (Some(start), Some(end)) = (self.prescribed_on, self.expires_on) {
            if end < start {
                form.push("expires_on", "must not precede the prescription date");
            }
        }
        form.into_result()
    }
}

/// Query parameters of the prescription list
#[derive(Debug, Clone, Default, Serialize)]
pub struct PrescriptionFilter {
    #[serde(rename = "patientId")]
    pub patient_id: Option<PatientId>,
    #[serde(rename = "medecinId")]
    pub clinician_id: Option<UserId>,
    #[serde(rename = "statut")]
    pub status: Option<PrescriptionStatus>,
    #[serde(rename = "dateDebut")]
    pub from: Option<NaiveDate>,
    #[serde(rename = "dateFin")]
    pub to: Option<NaiveDate>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amoxicillin() -> Medication {
        Medication {
            name: "Amoxicillin".to_string(),
            dosage: "500mg".to_string(),
            frequency: "3x/day".to_string(),
            duration: "7 days".to_string(),
            instructions: None,
        }
    }

    #[test]
    fn test_prescription_deserializes_medication_lines() {
        let prescription: Prescription = serde_json::from_value(serde_json::json!({
            "id": 11,
            "consultationId": 7,
            "patientId": 42,
            "medecinId": 3,
            "datePrescription": "2025-03-02",
            "dateExpiration": "2025-03-09",
            "statut": "EN_ATTENTE",
            "medicaments": [
                {"nom": "Amoxicillin", "dosage": "500mg", "frequence": "3x/day", "duree": "7 days"}
            ]
        }))
        .unwrap();

        assert_eq!(prescription.status, PrescriptionStatus::Pending);
        assert_eq!(prescription.medications, vec![amoxicillin()]);
        assert!(prescription.is_expired_on(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()));
        assert!(!prescription.is_expired_on(NaiveDate::from_ymd_opt(2025, 3, 9).unwrap()));
    }

    #[test]
    fn test_draft_needs_at_least_one_medication() {
        let draft = PrescriptionDraft {
            patient_id: Some(PatientId::new(42)),
            prescribed_on: NaiveDate::from_ymd_opt(2025, 3, 2),
            ..Default::default()
        };
        let err = draft.validate().unwrap_err();
        assert!(err.to_string().contains("at least one medication"));
    }

    #[test]
    fn test_draft_checks_each_medication_line() {
        let draft = PrescriptionDraft {
            patient_id: Some(PatientId::new(42)),
            prescribed_on: NaiveDate::from_ymd_opt(2025, 3, 2),
            medications: vec![
                amoxicillin(),
                Medication {
                    name: "Paracetamol".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let err = draft.validate().unwrap_err();
        assert!(err.to_string().contains("medication.dosage is required"));
    }

    #[test]
    fn test_valid_draft() {
        let draft = PrescriptionDraft {
            patient_id: Some(PatientId::new(42)),
            prescribed_on: NaiveDate::from_ymd_opt(2025, 3, 2),
            medications: vec![amoxicillin()],
            ..Default::default()
        };
        assert!(draft.validate().is_ok());
        assert_eq!(serde_json::to_value(&draft).unwrap()["statut"], "ACTIVE");
    }
}
