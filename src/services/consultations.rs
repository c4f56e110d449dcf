//! Consultation records

use super::resource::{Resource, ResourceService};
use crate::domain::{
    Consultation, ConsultationDraft, ConsultationFilter, ConsultationId, PatientId, Result,
};

/// `consultations` collection
#[derive(Debug, Clone, Copy)]
pub struct Consultations;

impl Resource for Consultations {
    const ENDPOINT: &'static str = "consultations";
    type Record = Consultation;
    type Id = ConsultationId;
    type Draft = ConsultationDraft;
    type Filter = ConsultationFilter;
}

pub type ConsultationService = ResourceService<Consultations>;

impl ResourceService<Consultations> {
    /// Every consultation of a patient, most recent first as sent by the
    /// backend
    ///
    /// # Errors
    ///
    /// Returns the classified API error.
    pub async fn by_patient(&self, patient: PatientId) -> Result<Vec<Consultation>> {
        Ok(self
            .api()
            .get(&format!("{}/patient/{patient}", Consultations::ENDPOINT))
            .await?)
    }
}
