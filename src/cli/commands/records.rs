//! Record commands: `list`, `show` and `delete`
//!
//! All three go through the same guarded navigation as the menu: a role
//! that cannot open a screen cannot read its records from the terminal
//! either.

use super::{open_context, report_failure, require_session, EXIT_AUTH, EXIT_OK};
use crate::core::navigation::NavigationOutcome;
use crate::core::AppContext;
use crate::domain::{
    Appointment, AppointmentFilter, Consultation, ConsultationFilter, Patient, PatientFilter,
    Prescription, PrescriptionFilter, User, UserFilter,
};
use crate::services::{Resource, ResourceService};
use clap::{Args, ValueEnum};
use serde::Serialize;
use std::fmt;

/// Record collections reachable from the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    Patients,
    Consultations,
    Prescriptions,
    Appointments,
    Users,
}

impl ResourceKind {
    /// Screen guarding this collection
    pub fn route(self) -> &'static str {
        match self {
            ResourceKind::Patients => "/patients",
            ResourceKind::Consultations => "/consultations",
            ResourceKind::Prescriptions => "/prescriptions",
            ResourceKind::Appointments => "/appointments",
            ResourceKind::Users => "/users",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.route().trim_start_matches('/'))
    }
}

/// List filters that accept paging and free-text search
pub trait PagedFilter: Default {
    fn paged(page: Option<u32>, size: Option<u32>, search: Option<String>) -> Self;
}

macro_rules! paged_filter {
    ($($filter:ty),+ $(,)?) => {
        $(
            impl PagedFilter for $filter {
                fn paged(page: Option<u32>, size: Option<u32>, search: Option<String>) -> Self {
                    Self {
                        page,
                        size,
                        search,
                        ..Self::default()
                    }
                }
            }
        )+
    };
}

paged_filter!(
    PatientFilter,
    ConsultationFilter,
    PrescriptionFilter,
    AppointmentFilter,
    UserFilter,
);

/// One table row per record
pub trait Listing {
    fn row(&self) -> String;
}

impl Listing for Patient {
    fn row(&self) -> String {
        format!(
            "{:<8} {:<30} {:<12} {}",
            self.id.get(),
            self.full_name(),
            self.birth_date.to_string(),
            self.phone.as_deref().unwrap_or("-")
        )
    }
}

impl Listing for Consultation {
    fn row(&self) -> String {
        format!(
            "{:<8} {:<18} {:<25} {:<12} {}",
            self.id.get(),
            self.date.format("%Y-%m-%d %H:%M").to_string(),
            self.patient_name.as_deref().unwrap_or("-"),
            self.status.to_string(),
            self.reason
        )
    }
}

impl Listing for Prescription {
    fn row(&self) -> String {
        format!(
            "{:<8} {:<12} {:<25} {:<12} {} medication(s)",
            self.id.get(),
            self.prescribed_on.to_string(),
            self.patient_name.as_deref().unwrap_or("-"),
            format!("{:?}", self.status).to_uppercase(),
            self.medications.len()
        )
    }
}

impl Listing for Appointment {
    fn row(&self) -> String {
        format!(
            "{:<8} {:<18} {:>4} min {:<25} {}",
            self.id.get(),
            self.starts_at.format("%Y-%m-%d %H:%M").to_string(),
            self.duration,
            self.patient_name.as_deref().unwrap_or("-"),
            self.status
        )
    }
}

impl Listing for User {
    fn row(&self) -> String {
        format!(
            "{:<8} {:<30} {:<30} {}",
            self.id.get(),
            self.full_name(),
            self.email,
            self.role
        )
    }
}

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    pub resource: ResourceKind,

    /// Zero-based page number
    #[arg(long)]
    pub page: Option<u32>,

    /// Page size
    #[arg(long)]
    pub size: Option<u32>,

    /// Free-text search
    #[arg(short, long)]
    pub search: Option<String>,
}

/// Arguments for the show command
#[derive(Args, Debug)]
pub struct ShowArgs {
    pub resource: ResourceKind,
    pub id: u64,
}

/// Arguments for the delete command
#[derive(Args, Debug)]
pub struct DeleteArgs {
    pub resource: ResourceKind,
    pub id: u64,
}

/// Opens the context and checks the signed-in role may open `kind`
async fn authorized_context(config_path: &str, kind: ResourceKind) -> Result<AppContext, i32> {
    let context = open_context(config_path).await?;
    if let Some(code) = require_session(&context) {
        return Err(code);
    }

    if let NavigationOutcome::Redirected { location, .. } =
        context.navigator().navigate(kind.route())
    {
        tracing::warn!(resource = %kind, redirected_to = %location, "Access denied");
        println!("⛔ Your role cannot access {kind}");
        return Err(EXIT_AUTH);
    }
    Ok(context)
}

async fn list_records<R>(
    service: ResourceService<R>,
    args: &ListArgs,
) -> crate::domain::Result<()>
where
    R: Resource,
    R::Record: Listing,
    R::Filter: PagedFilter,
{
    let filter = R::Filter::paged(args.page, args.size, args.search.clone());
    let page = service.list(&filter).await?;

    if page.is_empty() {
        println!("No {} found.", args.resource);
        return Ok(());
    }

    for record in &page.content {
        println!("{}", record.row());
    }
    println!();
    println!(
        "Page {}/{} ({} total)",
        page.number + 1,
        page.total_pages.max(1),
        page.total_elements
    );
    Ok(())
}

async fn show_record<R>(service: ResourceService<R>, id: u64) -> crate::domain::Result<()>
where
    R: Resource,
    R::Record: Serialize,
    R::Id: From<u64>,
{
    let record = service.get(R::Id::from(id)).await?;
    let json = serde_json::to_string_pretty(&record)?;
    println!("{json}");
    Ok(())
}

async fn delete_record<R>(service: ResourceService<R>, id: u64) -> crate::domain::Result<()>
where
    R: Resource,
    R::Id: From<u64>,
{
    service.delete(R::Id::from(id)).await
}

impl ListArgs {
    /// Execute the list command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let context = match authorized_context(config_path, self.resource).await {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        let result = match self.resource {
            ResourceKind::Patients => list_records(context.patients(), self).await,
            ResourceKind::Consultations => list_records(context.consultations(), self).await,
            ResourceKind::Prescriptions => list_records(context.prescriptions(), self).await,
            ResourceKind::Appointments => list_records(context.appointments(), self).await,
            ResourceKind::Users => list_records(context.users(), self).await,
        };

        Ok(match result {
            Ok(()) => EXIT_OK,
            Err(e) => report_failure("Listing", &e),
        })
    }
}

impl ShowArgs {
    /// Execute the show command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let context = match authorized_context(config_path, self.resource).await {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        let result = match self.resource {
            ResourceKind::Patients => show_record(context.patients(), self.id).await,
            ResourceKind::Consultations => show_record(context.consultations(), self.id).await,
            ResourceKind::Prescriptions => show_record(context.prescriptions(), self.id).await,
            ResourceKind::Appointments => show_record(context.appointments(), self.id).await,
            ResourceKind::Users => show_record(context.users(), self.id).await,
        };

        Ok(match result {
            Ok(()) => EXIT_OK,
            Err(e) => report_failure("Loading the record", &e),
        })
    }
}

impl DeleteArgs {
    /// Execute the delete command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let context = match authorized_context(config_path, self.resource).await {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        let result = match self.resource {
            ResourceKind::Patients => delete_record(context.patients(), self.id).await,
            ResourceKind::Consultations => delete_record(context.consultations(), self.id).await,
            ResourceKind::Prescriptions => delete_record(context.prescriptions(), self.id).await,
            ResourceKind::Appointments => delete_record(context.appointments(), self.id).await,
            ResourceKind::Users => delete_record(context.users(), self.id).await,
        };

        Ok(match result {
            Ok(()) => {
                context.notifications().success(format!("Deleted {} {}", self.resource, self.id));
                println!("🗑️  Deleted {} {}", self.resource, self.id);
                EXIT_OK
            }
            Err(e) => report_failure("Deletion", &e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paged_filter_keeps_other_fields_default() {
        let filter = PatientFilter::paged(Some(2), Some(50), Some("dur".to_string()));
        assert_eq!(filter.page, Some(2));
        assert_eq!(filter.size, Some(50));
        assert_eq!(filter.search.as_deref(), Some("dur"));
        assert!(filter.clinician_id.is_none());
    }

    #[test]
    fn test_resource_kind_display_matches_route() {
        assert_eq!(ResourceKind::Users.to_string(), "users");
        assert_eq!(ResourceKind::Appointments.route(), "/appointments");
    }

    #[test]
    fn test_user_row() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": 7,
            "email": "admin@x.com",
            "nom": "Durand",
            "prenom": "Paul",
            "role": "ADMIN"
        }))
        .unwrap();
        let row = user.row();
        assert!(row.starts_with("7 "));
        assert!(row.contains("Paul Durand"));
        assert!(row.ends_with("admin"));
    }
}
