//! Patient records

use super::ids::{PatientId, UserId};
use super::paging::SortDirection;
use super::result::Result;
use super::validation::{FormErrors, Validate};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Administrative sex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "AUTRE")]
    Other,
}

/// ABO/Rh blood group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BloodGroup {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

fn default_true() -> bool {
    true
}

/// Patient as stored by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: PatientId,
    #[serde(rename = "nom")]
    pub last_name: String,
    #[serde(rename = "prenom")]
    pub first_name: String,
    #[serde(rename = "dateNaissance")]
    pub birth_date: NaiveDate,
    #[serde(rename = "sexe")]
    pub sex: Sex,
    #[serde(rename = "adresse", default)]
    pub address: Option<String>,
    #[serde(rename = "telephone", default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "numeroSecuriteSociale", default)]
    pub social_security_number: Option<String>,
    #[serde(rename = "groupeSanguin", default)]
    pub blood_group: Option<BloodGroup>,
    #[serde(default)]
    pub allergies: Option<String>,
    #[serde(rename = "antecedentsMedicaux", default)]
    pub medical_history: Option<String>,
    #[serde(rename = "medecinTraitantId", default)]
    pub attending_clinician_id: Option<UserId>,
    #[serde(rename = "dateCreation", default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(rename = "dateModification", default)]
    pub updated_at: Option<NaiveDateTime>,
    #[serde(rename = "actif", default = "default_true")]
    pub active: bool,
}

impl Patient {
    /// "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Age in whole years on `today`
    pub fn age_on(&self, today: NaiveDate) -> u32 {
        today.years_since(self.birth_date).unwrap_or(0)
    }
}

/// Patient form submitted on create and update
#[derive(Debug, Clone, Default, Serialize)]
pub struct PatientDraft {
    #[serde(rename = "nom")]
    pub last_name: String,
    #[serde(rename = "prenom")]
    pub first_name: String,
    #[serde(rename = "dateNaissance")]
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "sexe")]
    pub sex: Option<Sex>,
    #[serde(rename = "adresse", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "telephone", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "numeroSecuriteSociale", skip_serializing_if = "Option::is_none")]
    pub social_security_number: Option<String>,
    #[serde(rename = "groupeSanguin", skip_serializing_if = "Option::is_none")]
    pub blood_group: Option<BloodGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allergies: Option<String>,
    #[serde(rename = "antecedentsMedicaux", skip_serializing_if = "Option::is_none")]
    pub medical_history: Option<String>,
    #[serde(rename = "medecinTraitantId", skip_serializing_if = "Option::is_none")]
    pub attending_clinician_id: Option<UserId>,
}

impl Validate for PatientDraft {
    fn validate(&self) -> Result<()> {
        let mut form = FormErrors::new();
        form.required("first_name", &self.first_name);
        form.required("last_name", &self.last_name);
        form.required_some("birth_date", self.birth_date.as_ref());
        form.required_some("sex", self.sex.as_ref());
        if let Some(email) = &self.email {
            form.email("email", email);
        }
        form.into_result()
    }
}

impl From<&Patient> for PatientDraft {
    fn from(patient: &Patient) -> Self {
        Self {
            last_name: patient.last_name.clone(),
            first_name: patient.first_name.clone(),
            birth_date: Some(patient.birth_date),
            sex: Some(patient.sex),
            address: patient.address.clone(),
            phone: patient.phone.clone(),
            email: patient.email.clone(),
            social_security_number: patient.social_security_number.clone(),
            blood_group: patient.blood_group,
            allergies: patient.allergies.clone(),
            medical_history: patient.medical_history.clone(),
            attending_clinician_id: patient.attending_clinician_id,
        }
    }
}

/// Query parameters of the patient list
#[derive(Debug, Clone, Default, Serialize)]
pub struct PatientFilter {
    pub search: Option<String>,
    #[serde(rename = "medecinId")]
    pub clinician_id: Option<UserId>,
    pub page: Option<u32>,
    pub size: Option<u32>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    #[serde(rename = "sortDir")]
    pub sort_dir: Option<SortDirection>,
}
