//! Hospital data model and store abstraction.
//!
//! The store is an explicitly owned, injectable object: the tool executor
//! and session manager receive it as `Arc<dyn HospitalStore>`, and tests
//! instantiate isolated stores per case.

mod memory;

pub use memory::MemoryStore;

use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Prefix for patient record numbers.
pub const RECORD_NUMBER_PREFIX: &str = "RM-";

/// Prefix for doctor identifiers.
pub const DOCTOR_ID_PREFIX: &str = "DOC-";

/// Care status of a patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareStatus {
    Outpatient,
    Inpatient,
    Discharged,
}

impl std::fmt::Display for CareStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CareStatus::Outpatient => write!(f, "Outpatient"),
            CareStatus::Inpatient => write!(f, "Inpatient"),
            CareStatus::Discharged => write!(f, "Discharged"),
        }
    }
}

/// Practice status of a doctor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PracticeStatus {
    Practicing,
    OnLeave,
    OnVacation,
}

impl std::fmt::Display for PracticeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PracticeStatus::Practicing => write!(f, "Practicing"),
            PracticeStatus::OnLeave => write!(f, "On leave"),
            PracticeStatus::OnVacation => write!(f, "On vacation"),
        }
    }
}

/// A registered patient.
///
/// The record number is assigned at registration and immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub record_number: String,
    pub name: String,
    pub birth_date: String,
    pub address: String,
    pub status: CareStatus,
    pub department: String,
    pub registered_at: DateTime<Utc>,
}

/// A doctor on staff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: String,
    /// Full name including credentials (e.g. "Dr. Andi Wijaya, Sp.PD").
    pub name: String,
    pub specialty: String,
    /// Free-text schedule description.
    pub schedule: String,
    pub status: PracticeStatus,
}

/// Derived counters for the dashboard display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Non-discharged patients plus a small simulated intake variance.
    pub recent_patients: usize,
    /// Current inpatients including the fixed ward baseline.
    pub inpatients: usize,
    pub practicing_doctors: usize,
    pub available_beds: u32,
    pub protocols: String,
    pub protocols_updated: String,
    pub pending_invoices: u32,
    pub insurance_claims: u32,
}

/// Abstraction over the hospital data store.
///
/// All mutation goes through here; the implementations return defensive
/// copies so callers never observe partial writes.
#[async_trait]
pub trait HospitalStore: Send + Sync {
    /// List all patients in store order.
    async fn list_patients(&self) -> Result<Vec<Patient>>;

    /// List all doctors in store order.
    async fn list_doctors(&self) -> Result<Vec<Doctor>>;

    /// Register a new patient with a fresh record number.
    ///
    /// Defaults: care status `Outpatient`, department `General`.
    async fn register_patient(&self, name: &str, birth_date: &str, address: &str)
        -> Result<Patient>;

    /// Add a doctor with a fresh identifier and status `Practicing`.
    async fn add_doctor(&self, name: &str, specialty: &str, schedule: &str) -> Result<Doctor>;

    /// Find a patient by exact record number or case-insensitive name substring.
    async fn find_patient(&self, query: &str) -> Result<Option<Patient>>;

    /// Find a doctor by case-insensitive substring of name or specialty.
    async fn find_doctor(&self, query: &str) -> Result<Option<Doctor>>;

    /// Compute dashboard statistics. Read-only apart from a simulated delay.
    async fn dashboard_stats(&self) -> Result<DashboardStats>;
}
