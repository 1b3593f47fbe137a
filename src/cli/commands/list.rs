//! Patient and doctor listing commands.

use super::build_store;
use crate::cli::Output;
use crate::config::Settings;
use crate::store::HospitalStore;
use anyhow::Result;

/// Run the patients command.
pub async fn run_patients(settings: Settings) -> Result<()> {
    let store = build_store(&settings);
    let patients = store.list_patients().await?;

    if patients.is_empty() {
        Output::info("No patients registered.");
        return Ok(());
    }

    Output::header(&format!("Patients ({})", patients.len()));
    println!();
    for patient in &patients {
        Output::patient_row(patient);
    }

    Ok(())
}

/// Run the doctors command.
pub async fn run_doctors(settings: Settings) -> Result<()> {
    let store = build_store(&settings);
    let doctors = store.list_doctors().await?;

    if doctors.is_empty() {
        Output::info("No doctors on staff.");
        return Ok(());
    }

    Output::header(&format!("Doctors ({})", doctors.len()));
    println!();
    for doctor in &doctors {
        Output::doctor_row(doctor);
    }

    Ok(())
}
