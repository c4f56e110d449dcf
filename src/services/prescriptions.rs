//! Prescription records

use super::resource::{Resource, ResourceService};
use crate::domain::{
    PatientId, Prescription, PrescriptionDraft, PrescriptionFilter, PrescriptionId, Result,
};

/// `prescriptions` collection
#[derive(Debug, Clone, Copy)]
pub struct Prescriptions;

impl Resource for Prescriptions {
    const ENDPOINT: &'static str = "prescriptions";
    type Record = Prescription;
    type Id = PrescriptionId;
    type Draft = PrescriptionDraft;
    type Filter = PrescriptionFilter;
}

pub type PrescriptionService = ResourceService<Prescriptions>;

impl ResourceService<Prescriptions> {
    /// Every prescription of a patient
    ///
    /// # Errors
    ///
    /// Returns the classified API error.
    pub async fn by_patient(&self, patient: PatientId) -> Result<Vec<Prescription>> {
        Ok(self
            .api()
            .get(&format!("{}/patient/{patient}", Prescriptions::ENDPOINT))
            .await?)
    }
}
