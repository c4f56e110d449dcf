//! Reports
//!
//! Report payloads are defined by the backend and rendered as-is, so they
//! are returned as raw JSON.

use crate::adapters::http::{ApiClient, QueryParams};
use crate::domain::{PatientId, Result};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Aggregation period accepted by the statistics endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    Day,
    Week,
    Month,
    Year,
}

impl ReportPeriod {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportPeriod::Day => "day",
            ReportPeriod::Week => "week",
            ReportPeriod::Month => "month",
            ReportPeriod::Year => "year",
        }
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportPeriod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" => Ok(ReportPeriod::Day),
            "week" => Ok(ReportPeriod::Week),
            "month" => Ok(ReportPeriod::Month),
            "year" => Ok(ReportPeriod::Year),
            other => Err(format!(
                "Invalid period '{other}'. Must be one of: day, week, month, year"
            )),
        }
    }
}

/// Report endpoints
#[derive(Debug, Clone)]
pub struct ReportService {
    api: ApiClient,
}

impl ReportService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Medical summary of one patient
    ///
    /// # Errors
    ///
    /// Returns the classified API error.
    pub async fn medical_report(&self, patient: PatientId) -> Result<Value> {
        Ok(self.api.get(&format!("reports/medical/{patient}")).await?)
    }

    /// General statistics; `params` is passed through as query parameters
    ///
    /// # Errors
    ///
    /// Returns the classified API error.
    pub async fn statistics(&self, params: QueryParams) -> Result<Value> {
        Ok(self.api.get_with_params("reports/statistics", params).await?)
    }

    /// Consultation counts over `period`
    ///
    /// # Errors
    ///
    /// Returns the classified API error.
    pub async fn consultation_stats(&self, period: ReportPeriod) -> Result<Value> {
        self.period_report("reports/consultations", period).await
    }

    /// Patient population statistics
    ///
    /// # Errors
    ///
    /// Returns the classified API error.
    pub async fn patient_stats(&self) -> Result<Value> {
        Ok(self.api.get("reports/patients").await?)
    }

    /// Revenue over `period`
    ///
    /// # Errors
    ///
    /// Returns the classified API error.
    pub async fn revenue_stats(&self, period: ReportPeriod) -> Result<Value> {
        self.period_report("reports/revenue", period).await
    }

    async fn period_report(&self, endpoint: &str, period: ReportPeriod) -> Result<Value> {
        let params = QueryParams::new().with("period", period);
        Ok(self.api.get_with_params(endpoint, params).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing;
    use mockito::Matcher;
    use test_case::test_case;

    #[test_case("month", ReportPeriod::Month ; "lowercase")]
    #[test_case(" Year ", ReportPeriod::Year ; "padded mixed case")]
    fn test_period_from_str(input: &str, expected: ReportPeriod) {
        assert_eq!(input.parse::<ReportPeriod>().unwrap(), expected);
    }

    #[test]
    fn test_period_rejects_unknown() {
        assert!("quarter".parse::<ReportPeriod>().is_err());
    }

    #[tokio::test]
    async fn test_revenue_stats_sends_period() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/reports/revenue")
            .match_query(Matcher::UrlEncoded("period".into(), "week".into()))
            .with_status(200)
            .with_body(r#"{"total": 1250.5}"#)
            .create_async()
            .await;

        let reports = ReportService::new(testing::api(server.url()));
        let revenue = reports.revenue_stats(ReportPeriod::Week).await.unwrap();

        mock.assert_async().await;
        assert_eq!(revenue["total"], 1250.5);
    }

    #[tokio::test]
    async fn test_medical_report_path() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/reports/medical/12")
            .with_status(200)
            .with_body(r#"{"patient": {"id": 12}}"#)
            .create_async()
            .await;

        let reports = ReportService::new(testing::api(server.url()));
        let report = reports.medical_report(PatientId::new(12)).await.unwrap();

        mock.assert_async().await;
        assert_eq!(report["patient"]["id"], 12);
    }

    #[tokio::test]
    async fn test_statistics_passes_params_through() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/reports/statistics")
            .match_query(Matcher::UrlEncoded("annee".into(), "2025".into()))
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let reports = ReportService::new(testing::api(server.url()));
        reports
            .statistics(QueryParams::new().with("annee", 2025))
            .await
            .unwrap();

        mock.assert_async().await;
    }
}
