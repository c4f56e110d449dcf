//! Patient records

use super::resource::{Resource, ResourceService};
use crate::adapters::http::QueryParams;
use crate::domain::{Patient, PatientDraft, PatientFilter, PatientId, Result};

/// `patients` collection
#[derive(Debug, Clone, Copy)]
pub struct Patients;

impl Resource for Patients {
    const ENDPOINT: &'static str = "patients";
    type Record = Patient;
    type Id = PatientId;
    type Draft = PatientDraft;
    type Filter = PatientFilter;
}

pub type PatientService = ResourceService<Patients>;

impl ResourceService<Patients> {
    /// Free-text search by name, phone or social security number
    ///
    /// # Errors
    ///
    /// Returns the classified API error.
    pub async fn search(&self, query: &str) -> Result<Vec<Patient>> {
        let params = QueryParams::new().with("q", query.trim());
        Ok(self.api().get_with_params("patients/search", params).await?)
    }
}
