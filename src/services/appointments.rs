//! Appointments and the calendar

use super::resource::{Resource, ResourceService};
use crate::domain::{
    Appointment, AppointmentDraft, AppointmentFilter, AppointmentId, AppointmentStatus,
    CabinetError, CalendarRange, Result, StatusChange,
};

/// `appointments` collection
#[derive(Debug, Clone, Copy)]
pub struct Appointments;

impl Resource for Appointments {
    const ENDPOINT: &'static str = "appointments";
    type Record = Appointment;
    type Id = AppointmentId;
    type Draft = AppointmentDraft;
    type Filter = AppointmentFilter;
}

pub type AppointmentService = ResourceService<Appointments>;

impl ResourceService<Appointments> {
    /// Appointments between two dates, inclusive, for the calendar view
    ///
    /// # Errors
    ///
    /// Returns a validation error when `range` ends before it starts,
    /// otherwise the classified API error.
    pub async fn calendar(&self, range: &CalendarRange) -> Result<Vec<Appointment>> {
        if range.end < range.start {
            return Err(CabinetError::Validation(
                "end must not be before start".to_string(),
            ));
        }
        Ok(self.api().get_with_query("appointments/calendar", range).await?)
    }

    /// Moves an appointment to `status` without resending the whole record
    ///
    /// # Errors
    ///
    /// Returns the classified API error.
    pub async fn update_status(
        &self,
        id: AppointmentId,
        status: AppointmentStatus,
    ) -> Result<Appointment> {
        let updated = self
            .api()
            .patch(&format!("appointments/{id}/statut"), &StatusChange { status })
            .await?;
        tracing::info!(appointment_id = %id, status = %status, "Appointment status changed");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing;
    use chrono::NaiveDate;
    use mockito::Matcher;

    const APPOINTMENT: &str = r#"{
        "id": 40,
        "patientId": 12,
        "medecinId": 2,
        "dateHeure": "2025-03-04T10:00:00",
        "duree": 30,
        "type": "SUIVI",
        "statut": "CONFIRME"
    }"#;

    #[tokio::test]
    async fn test_calendar_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/appointments/calendar")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("debut".into(), "2025-03-03".into()),
                Matcher::UrlEncoded("fin".into(), "2025-03-09".into()),
            ]))
            .with_status(200)
            .with_body(format!("[{APPOINTMENT}]"))
            .create_async()
            .await;

        let service = AppointmentService::new(testing::api(server.url()));
        let week = CalendarRange {
            start: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
        };
        let appointments = service.calendar(&week).await.unwrap();

        mock.assert_async().await;
        assert_eq!(appointments[0].status, AppointmentStatus::Confirmed);
    }

    #[tokio::test]
    async fn test_calendar_rejects_inverted_range() {
        let server = mockito::Server::new_async().await;
        let service = AppointmentService::new(testing::api(server.url()));
        let inverted = CalendarRange {
            start: NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
        };

        assert!(matches!(
            service.calendar(&inverted).await,
            Err(CabinetError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_update_status_patches_statut() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PATCH", "/appointments/40/statut")
            .match_body(Matcher::Json(serde_json::json!({"statut": "ANNULE"})))
            .with_status(200)
            .with_body(APPOINTMENT.replace("CONFIRME", "ANNULE"))
            .create_async()
            .await;

        let service = AppointmentService::new(testing::api(server.url()));
        let updated = service
            .update_status(AppointmentId::new(40), AppointmentStatus::Cancelled)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(updated.status, AppointmentStatus::Cancelled);
    }
}
