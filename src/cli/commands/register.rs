//! Direct doctor registration command.
//!
//! The structured write API: used when the caller already has the fields and
//! chooses not to go through free-text classification.

use super::build_store;
use crate::cli::Output;
use crate::config::Settings;
use crate::store::HospitalStore;
use anyhow::Result;

/// Run the add-doctor command.
pub async fn run_add_doctor(
    name: &str,
    specialty: &str,
    schedule: &str,
    settings: Settings,
) -> Result<()> {
    let store = build_store(&settings);
    let doctor = store.add_doctor(name, specialty, schedule).await?;

    Output::success(&format!("Doctor {} added.", doctor.name));
    Output::kv("ID", &doctor.id);
    Output::kv("Specialty", &doctor.specialty);
    Output::kv("Schedule", &doctor.schedule);
    Output::kv("Status", &doctor.status.to_string());

    Ok(())
}
