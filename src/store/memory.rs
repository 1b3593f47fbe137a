//! In-memory hospital store implementation.
//!
//! Data lives for the lifetime of the process; a restart resets it.

use super::{
    CareStatus, DashboardStats, Doctor, HospitalStore, Patient, PracticeStatus, DOCTOR_ID_PREFIX,
    RECORD_NUMBER_PREFIX,
};
use crate::error::{MedikaError, Result};
use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use std::sync::RwLock;
use std::time::Duration;

/// Upper bound on identifier regeneration attempts before giving up.
const MAX_ID_ATTEMPTS: usize = 100;

/// Simulated latency for dashboard aggregation.
const STATS_DELAY: Duration = Duration::from_millis(600);

/// In-memory hospital store.
pub struct MemoryStore {
    patients: RwLock<Vec<Patient>>,
    doctors: RwLock<Vec<Doctor>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            patients: RwLock::new(Vec::new()),
            doctors: RwLock::new(Vec::new()),
        }
    }

    /// Create a store pre-populated with a small ward of patients and doctors,
    /// so lists, lookups, and stats are non-trivial out of the box.
    pub fn seeded() -> Self {
        let now = Utc::now();
        let patients = vec![
            Patient {
                record_number: "RM-3921".to_string(),
                name: "Budi Santoso".to_string(),
                birth_date: "1982-05-12".to_string(),
                address: "Jl. Merdeka No. 10".to_string(),
                status: CareStatus::Inpatient,
                department: "Internal Medicine".to_string(),
                registered_at: now,
            },
            Patient {
                record_number: "RM-4420".to_string(),
                name: "Siti Aminah".to_string(),
                birth_date: "1995-10-23".to_string(),
                address: "Jl. Melati No. 5".to_string(),
                status: CareStatus::Outpatient,
                department: "General".to_string(),
                registered_at: now,
            },
            Patient {
                record_number: "RM-5512".to_string(),
                name: "Doni Pratama".to_string(),
                birth_date: "2015-01-30".to_string(),
                address: "Jl. Kebon Jeruk".to_string(),
                status: CareStatus::Inpatient,
                department: "Pediatrics".to_string(),
                registered_at: now,
            },
            Patient {
                record_number: "RM-1029".to_string(),
                name: "Ratna Sari".to_string(),
                birth_date: "1978-12-12".to_string(),
                address: "Jl. Sudirman 45".to_string(),
                status: CareStatus::Discharged,
                department: "Cardiology".to_string(),
                registered_at: now,
            },
        ];
        let doctors = vec![
            Doctor {
                id: "DOC-001".to_string(),
                name: "Dr. Andi Wijaya, Sp.PD".to_string(),
                specialty: "Internal Medicine".to_string(),
                schedule: "Mon - Thu (08:00 - 14:00)".to_string(),
                status: PracticeStatus::Practicing,
            },
            Doctor {
                id: "DOC-002".to_string(),
                name: "Dr. Sarah Amelia, Sp.A".to_string(),
                specialty: "Pediatrics".to_string(),
                schedule: "Tue, Fri (10:00 - 16:00)".to_string(),
                status: PracticeStatus::Practicing,
            },
            Doctor {
                id: "DOC-003".to_string(),
                name: "Dr. Budi Hartono, Sp.JP".to_string(),
                specialty: "Cardiology".to_string(),
                schedule: "Wed (18:00 - 21:00)".to_string(),
                status: PracticeStatus::OnLeave,
            },
            Doctor {
                id: "DOC-004".to_string(),
                name: "Dr. Citra Lestari, Sp.M".to_string(),
                specialty: "Ophthalmology".to_string(),
                schedule: "Mon, Wed, Fri (09:00 - 13:00)".to_string(),
                status: PracticeStatus::Practicing,
            },
        ];
        Self {
            patients: RwLock::new(patients),
            doctors: RwLock::new(doctors),
        }
    }

    /// Generate an identifier unique among the given live identifiers.
    ///
    /// Random candidates are checked against the live set and regenerated on
    /// collision, up to `MAX_ID_ATTEMPTS`. The reference system skipped the
    /// check entirely; uniqueness-so-far is an invariant here.
    fn fresh_id(prefix: &str, digits: usize, existing: &[String]) -> Result<String> {
        let mut rng = rand::thread_rng();
        let bound = 10usize.pow(digits as u32);
        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = format!("{}{:0width$}", prefix, rng.gen_range(0..bound), width = digits);
            if !existing.iter().any(|id| id == &candidate) {
                return Ok(candidate);
            }
        }
        Err(MedikaError::IdentifierExhausted(prefix.to_string()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HospitalStore for MemoryStore {
    async fn list_patients(&self) -> Result<Vec<Patient>> {
        let patients = self.patients.read().unwrap();
        Ok(patients.clone())
    }

    async fn list_doctors(&self) -> Result<Vec<Doctor>> {
        let doctors = self.doctors.read().unwrap();
        Ok(doctors.clone())
    }

    async fn register_patient(
        &self,
        name: &str,
        birth_date: &str,
        address: &str,
    ) -> Result<Patient> {
        let mut patients = self.patients.write().unwrap();
        let live: Vec<String> = patients.iter().map(|p| p.record_number.clone()).collect();
        let record_number = Self::fresh_id(RECORD_NUMBER_PREFIX, 4, &live)?;

        let patient = Patient {
            record_number,
            name: name.to_string(),
            birth_date: birth_date.to_string(),
            address: address.to_string(),
            status: CareStatus::Outpatient,
            department: "General".to_string(),
            registered_at: Utc::now(),
        };
        patients.push(patient.clone());
        Ok(patient)
    }

    async fn add_doctor(&self, name: &str, specialty: &str, schedule: &str) -> Result<Doctor> {
        let mut doctors = self.doctors.write().unwrap();
        let live: Vec<String> = doctors.iter().map(|d| d.id.clone()).collect();
        let id = Self::fresh_id(DOCTOR_ID_PREFIX, 3, &live)?;

        let doctor = Doctor {
            id,
            name: name.to_string(),
            specialty: specialty.to_string(),
            schedule: schedule.to_string(),
            status: PracticeStatus::Practicing,
        };
        doctors.push(doctor.clone());
        Ok(doctor)
    }

    async fn find_patient(&self, query: &str) -> Result<Option<Patient>> {
        let patients = self.patients.read().unwrap();
        let needle = query.to_lowercase();
        Ok(patients
            .iter()
            .find(|p| p.record_number == query || p.name.to_lowercase().contains(&needle))
            .cloned())
    }

    async fn find_doctor(&self, query: &str) -> Result<Option<Doctor>> {
        let doctors = self.doctors.read().unwrap();
        let needle = query.to_lowercase();
        Ok(doctors
            .iter()
            .find(|d| {
                d.name.to_lowercase().contains(&needle)
                    || d.specialty.to_lowercase().contains(&needle)
            })
            .cloned())
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats> {
        // Stands in for an aggregation query against a real backend.
        tokio::time::sleep(STATS_DELAY).await;

        let (active, inpatients) = {
            let patients = self.patients.read().unwrap();
            (
                patients.iter().filter(|p| p.status != CareStatus::Discharged).count(),
                patients.iter().filter(|p| p.status == CareStatus::Inpatient).count(),
            )
        };
        let practicing = {
            let doctors = self.doctors.read().unwrap();
            doctors.iter().filter(|d| d.status == PracticeStatus::Practicing).count()
        };

        let variance = rand::thread_rng().gen_range(0..5);

        Ok(DashboardStats {
            recent_patients: active + variance,
            inpatients: inpatients + 40,
            practicing_doctors: practicing,
            available_beds: 12,
            protocols: "120+".to_string(),
            protocols_updated: "Just now".to_string(),
            pending_invoices: 5,
            insurance_claims: 2,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[tokio::test]
    async fn test_register_then_find_round_trip() {
        let store = MemoryStore::new();
        let patient = store
            .register_patient("Ani", "1990-01-01", "Jl. A")
            .await
            .unwrap();

        assert!(patient.record_number.starts_with(RECORD_NUMBER_PREFIX));
        assert_eq!(patient.status, CareStatus::Outpatient);
        assert_eq!(patient.department, "General");

        let found = store.find_patient(&patient.record_number).await.unwrap();
        assert_eq!(found.unwrap().name, "Ani");
    }

    #[tokio::test]
    async fn test_record_numbers_pairwise_distinct() {
        let store = MemoryStore::new();
        let mut seen = HashSet::new();
        for i in 0..50 {
            let p = store
                .register_patient(&format!("Patient {}", i), "2000-01-01", "-")
                .await
                .unwrap();
            assert!(seen.insert(p.record_number), "duplicate record number");
        }
    }

    #[tokio::test]
    async fn test_list_patients_idempotent() {
        let store = MemoryStore::seeded();
        let first = store.list_patients().await.unwrap();
        let second = store.list_patients().await.unwrap();
        let ids: Vec<_> = first.iter().map(|p| &p.record_number).collect();
        let ids2: Vec<_> = second.iter().map(|p| &p.record_number).collect();
        assert_eq!(ids, ids2);
        assert_eq!(first.len(), 4);
    }

    #[tokio::test]
    async fn test_find_patient_by_name_substring() {
        let store = MemoryStore::seeded();
        let found = store.find_patient("siti").await.unwrap().unwrap();
        assert_eq!(found.record_number, "RM-4420");

        assert!(store.find_patient("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_doctor_by_specialty_substring() {
        let store = MemoryStore::new();
        store
            .add_doctor("Dr. X", "Neurology", "Mon-Fri")
            .await
            .unwrap();

        let found = store.find_doctor("neuro").await.unwrap().unwrap();
        assert_eq!(found.name, "Dr. X");
        assert_eq!(found.status, PracticeStatus::Practicing);
    }

    #[tokio::test]
    async fn test_dashboard_stats_counts() {
        let store = MemoryStore::seeded();
        let stats = store.dashboard_stats().await.unwrap();

        // Seeded: 3 non-discharged (+0..4 variance), 2 inpatients, 3 practicing.
        assert!((3..8).contains(&stats.recent_patients));
        assert_eq!(stats.inpatients, 42);
        assert_eq!(stats.practicing_doctors, 3);
        assert_eq!(stats.available_beds, 12);
        assert_eq!(stats.protocols, "120+");
    }
}
