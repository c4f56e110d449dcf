//! Dashboard command implementation

use super::{open_context, report_failure, require_session, EXIT_OK};
use crate::core::guards::DASHBOARD_PATH;
use crate::domain::{DashboardStats, RecentConsultation};
use clap::Args;

/// Arguments for the dashboard command
#[derive(Args, Debug)]
pub struct DashboardArgs {
    /// Also list the most recent consultations
    #[arg(long)]
    pub recent: bool,
}

impl DashboardArgs {
    /// Execute the dashboard command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let context = match open_context(config_path).await {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };
        if let Some(code) = require_session(&context) {
            return Ok(code);
        }
        context.navigator().navigate(DASHBOARD_PATH);

        let service = context.dashboard();
        let stats = match service.stats().await {
            Ok(stats) => stats,
            Err(e) => return Ok(report_failure("Loading the dashboard", &e)),
        };

        println!("🏥 Dashboard");
        println!();
        print_stats(&stats);

        if self.recent {
            match service.recent_consultations().await {
                Ok(recent) => print_recent(&recent),
                Err(e) => return Ok(report_failure("Loading recent consultations", &e)),
            }
        }

        println!();
        Ok(EXIT_OK)
    }
}

fn print_stats(stats: &DashboardStats) {
    println!("  Patients:                {}", stats.total_patients);
    println!("  New patients this month: {}", stats.new_patients_this_month);
    println!("  Consultations today:     {}", stats.consultations_today);
    println!("  Consultations this week: {}", stats.consultations_this_week);
    println!("  Appointments today:      {}", stats.appointments_today);
    println!("  Active prescriptions:    {}", stats.active_prescriptions);
}

fn print_recent(recent: &[RecentConsultation]) {
    println!();
    if recent.is_empty() {
        println!("No recent consultations.");
        return;
    }
    println!(
        "{:<8} {:<20} {:<25} {:<25} {:<12}",
        "ID", "Date", "Patient", "Clinician", "Status"
    );
    println!("{}", "-".repeat(94));
    for row in recent {
        println!(
            "{:<8} {:<20} {:<25} {:<25} {:<12}",
            row.id.get(),
            row.date,
            row.patient_name,
            row.clinician_name,
            row.status
        );
    }
}
