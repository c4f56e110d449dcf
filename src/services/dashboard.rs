//! Dashboard widgets

use crate::adapters::http::ApiClient;
use crate::domain::{DashboardStats, RecentConsultation, Result};
use serde_json::Value;

/// Dashboard endpoints
#[derive(Debug, Clone)]
pub struct DashboardService {
    api: ApiClient,
}

impl DashboardService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Headline counters
    ///
    /// # Errors
    ///
    /// Returns the classified API error.
    pub async fn stats(&self) -> Result<DashboardStats> {
        Ok(self.api.get("dashboard/stats").await?)
    }

    /// Latest consultations across the practice
    ///
    /// # Errors
    ///
    /// Returns the classified API error.
    pub async fn recent_consultations(&self) -> Result<Vec<RecentConsultation>> {
        Ok(self.api.get("dashboard/consultations-recentes").await?)
    }

    /// Today's appointments, in the backend's widget format
    ///
    /// # Errors
    ///
    /// Returns the classified API error.
    pub async fn todays_appointments(&self) -> Result<Vec<Value>> {
        Ok(self.api.get("dashboard/rendez-vous-aujourd-hui").await?)
    }

    /// Consultation chart data
    ///
    /// # Errors
    ///
    /// Returns the classified API error.
    pub async fn consultation_statistics(&self) -> Result<Value> {
        Ok(self.api.get("dashboard/statistiques-consultations").await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing;

    #[tokio::test]
    async fn test_stats_tolerates_missing_counters() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/dashboard/stats")
            .with_status(200)
            .with_body(r#"{"totalPatients": 312, "rendezVousAujourdhui": 9}"#)
            .create_async()
            .await;

        let dashboard = DashboardService::new(testing::api(server.url()));
        let stats = dashboard.stats().await.unwrap();

        assert_eq!(stats.total_patients, 312);
        assert_eq!(stats.appointments_today, 9);
        assert_eq!(stats.active_prescriptions, 0);
    }

    #[tokio::test]
    async fn test_recent_consultations() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/dashboard/consultations-recentes")
            .with_status(200)
            .with_body(
                r#"[{"id":1,"patientNom":"Jeanne Dupont","medecinNom":"Dr Martin",
                    "dateConsultation":"04/03/2025","statut":"Terminée","motif":"Suivi"}]"#,
            )
            .create_async()
            .await;

        let dashboard = DashboardService::new(testing::api(server.url()));
        let recent = dashboard.recent_consultations().await.unwrap();

        assert_eq!(recent[0].patient_name, "Jeanne Dupont");
    }

    #[tokio::test]
    async fn test_server_error_surfaces() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/dashboard/rendez-vous-aujourd-hui")
            .with_status(500)
            .create_async()
            .await;

        let dashboard = DashboardService::new(testing::api(server.url()));
        let err = dashboard.todays_appointments().await.unwrap_err();

        assert_eq!(err.user_message(), "Server error, please try again later");
    }
}
