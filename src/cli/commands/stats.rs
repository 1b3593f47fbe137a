//! Dashboard statistics command.

use super::build_store;
use crate::cli::Output;
use crate::config::Settings;
use crate::store::HospitalStore;
use anyhow::Result;

/// Run the stats command.
pub async fn run_stats(settings: Settings) -> Result<()> {
    let store = build_store(&settings);

    let spinner = Output::spinner("Aggregating...");
    let stats = store.dashboard_stats().await?;
    spinner.finish_and_clear();

    Output::header("Dashboard");
    println!();
    Output::kv("Recent patients", &stats.recent_patients.to_string());
    Output::kv("Inpatients", &stats.inpatients.to_string());
    Output::kv("Practicing doctors", &stats.practicing_doctors.to_string());
    Output::kv("Available beds", &stats.available_beds.to_string());
    Output::kv(
        "Medical protocols",
        &format!("{} (updated {})", stats.protocols, stats.protocols_updated),
    );
    Output::kv("Pending invoices", &stats.pending_invoices.to_string());
    Output::kv("Insurance claims", &stats.insurance_claims.to_string());

    Ok(())
}
