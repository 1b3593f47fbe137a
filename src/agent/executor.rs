//! Tool executor: performs the store operation behind a routed capability.
//!
//! Shared by both routing paths. Execution results are opaque JSON bags the
//! narration layer probes by field name, matching the provider's
//! function-response contract.

use super::extract;
use super::tools::{
    parse_tool_call, AdminCategory, PatientAction, SchedulingService, ToolCall, CAPABILITY_NAMES,
};
use crate::error::Result;
use crate::store::HospitalStore;
use rand::Rng;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Placeholder used when the detail blob carries no patient name.
const FALLBACK_PATIENT_NAME: &str = "New Patient";
/// Placeholder used when the detail blob carries no birth date.
const FALLBACK_BIRTH_DATE: &str = "2000-01-01";
/// Placeholder used when the detail blob carries no address.
const FALLBACK_ADDRESS: &str = "Address incomplete";

/// Default simulated latency, standing in for real backend I/O.
const SIMULATED_LATENCY: Duration = Duration::from_millis(800);

/// Executes routed tool calls against the hospital store.
pub struct ToolExecutor {
    store: Arc<dyn HospitalStore>,
    latency: Duration,
}

impl ToolExecutor {
    /// Create an executor over the given store.
    pub fn new(store: Arc<dyn HospitalStore>) -> Self {
        Self {
            store,
            latency: SIMULATED_LATENCY,
        }
    }

    /// Override the simulated latency (tests use zero).
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Shared handle to the underlying store.
    pub fn store(&self) -> Arc<dyn HospitalStore> {
        Arc::clone(&self.store)
    }

    /// Execute a raw tool call as received from the provider.
    ///
    /// Never fails: an unrecognized capability, malformed arguments, or an
    /// execution error all come back as a result-level `error` field the
    /// caller inspects.
    pub async fn execute_raw(&self, name: &str, arguments: &str) -> Value {
        if !CAPABILITY_NAMES.contains(&name) {
            return json!({ "error": "capability not recognized" });
        }
        match parse_tool_call(name, arguments) {
            Ok(call) => match self.execute(&call).await {
                Ok(result) => result,
                Err(e) => json!({ "error": e.to_string() }),
            },
            Err(e) => json!({ "error": e.to_string() }),
        }
    }

    /// Execute a typed tool call and return its structured result.
    pub async fn execute(&self, call: &ToolCall) -> Result<Value> {
        debug!("Executing tool: {}", call.name());
        tokio::time::sleep(self.latency).await;

        match call {
            ToolCall::PatientDataManagement {
                action,
                identity_number,
                patient_details,
            } => {
                self.execute_patient_data(*action, identity_number, patient_details.as_deref())
                    .await
            }
            ToolCall::MedicalScheduling {
                service,
                subject,
                schedule_time,
                ..
            } => self.execute_scheduling(*service, subject, schedule_time).await,
            ToolCall::GeneralMedicalInformation {
                topic,
                source_priority,
            } => Ok(medical_information(topic, source_priority.as_deref())),
            ToolCall::HospitalAdministration {
                category,
                reference,
                period,
            } => Ok(administration(*category, reference.as_deref(), period.as_deref())),
        }
    }

    async fn execute_patient_data(
        &self,
        action: PatientAction,
        identity_number: &str,
        patient_details: Option<&str>,
    ) -> Result<Value> {
        match action {
            PatientAction::NewRegistration => {
                let details = patient_details.unwrap_or_default();
                let name =
                    extract::patient_name(details).unwrap_or_else(|| FALLBACK_PATIENT_NAME.into());
                let birth_date =
                    extract::birth_date(details).unwrap_or_else(|| FALLBACK_BIRTH_DATE.into());
                let address = extract::address(details).unwrap_or_else(|| FALLBACK_ADDRESS.into());

                let patient = self.store.register_patient(&name, &birth_date, &address).await?;
                info!("Registered patient {} ({})", patient.name, patient.record_number);

                Ok(json!({
                    "status": "success",
                    "message": format!("Patient {} successfully registered.", patient.name),
                    "detail": details,
                    "new_record_number": patient.record_number,
                }))
            }
            PatientAction::CareStatusCheck => {
                match self.store.find_patient(identity_number).await? {
                    Some(patient) => Ok(json!({
                        "status": "found",
                        "name": patient.name,
                        "care_status": patient.status.to_string(),
                        "room": "Ward Mawar 101",
                    })),
                    None => Ok(json!({
                        "status": "not_found",
                        "message": "Patient not found",
                    })),
                }
            }
            // Update and record retrieval are acknowledged without a backing
            // operation; the store has no history model in scope.
            PatientAction::DataUpdate | PatientAction::MedicalRecordRetrieval => Ok(json!({
                "status": "success",
                "data": "Patient data request processed.",
            })),
        }
    }

    async fn execute_scheduling(
        &self,
        service: SchedulingService,
        subject: &str,
        schedule_time: &str,
    ) -> Result<Value> {
        match service {
            SchedulingService::DoctorScheduleCheck => {
                match self.store.find_doctor(subject).await? {
                    Some(doctor) => Ok(json!({
                        "status": "available",
                        "message": format!(
                            "{} ({}). Schedule: {}. Status: {}",
                            doctor.name, doctor.specialty, doctor.schedule, doctor.status
                        ),
                    })),
                    None => Ok(json!({
                        "status": "available",
                        "message": "A general practitioner is available. Please visit the general clinic.",
                        "slots": ["09:00", "10:00", "14:00"],
                    })),
                }
            }
            SchedulingService::AppointmentBooking => Ok(json!({
                "status": "confirmed",
                "booking_code": booking_code(),
                "info": format!(
                    "Appointment with {} at {} has been booked.",
                    subject, schedule_time
                ),
            })),
            SchedulingService::FacilityAvailabilityCheck => Ok(json!({
                "status": "info",
                "message": "Facilities are available.",
            })),
        }
    }
}

fn medical_information(topic: &str, source_priority: Option<&str>) -> Value {
    json!({
        "reference": source_priority.unwrap_or("Hospital Clinical Guideline"),
        "content": format!(
            "Information on {}: per standard protocol, initial handling covers \
            vital-sign observation and stabilization of the patient.",
            topic
        ),
    })
}

fn administration(category: AdminCategory, reference: Option<&str>, period: Option<&str>) -> Value {
    match category {
        AdminCategory::BillingCheck => json!({
            "invoice_id": reference.unwrap_or("INV-Unknown"),
            "total": "Rp 4.500.000",
            "status": "Unpaid",
            "line_items": ["Medication", "Room (3 days)", "Doctor fee"],
        }),
        AdminCategory::FinancialReport => json!({
            "report": "Profit and loss statement",
            "period": period.unwrap_or("unspecified"),
            "summary": "Operational surplus of 12% against the previous period.",
        }),
        AdminCategory::InsuranceClaim
        | AdminCategory::AssetManagement
        | AdminCategory::InventoryCheck => json!({
            "status": "processed",
            "message": "The administrative request has been processed.",
        }),
    }
}

/// Generate a short booking confirmation code.
fn booking_code() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..6)
        .map(|_| {
            let c = rng.sample(rand::distributions::Alphanumeric) as char;
            c.to_ascii_uppercase()
        })
        .collect();
    format!("BOOK-{}", suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{CareStatus, MemoryStore};

    fn executor() -> ToolExecutor {
        ToolExecutor::new(Arc::new(MemoryStore::new())).with_latency(Duration::ZERO)
    }

    fn seeded_executor() -> ToolExecutor {
        ToolExecutor::new(Arc::new(MemoryStore::seeded())).with_latency(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_registration_extracts_labeled_fields() {
        let exec = executor();
        let call = ToolCall::PatientDataManagement {
            action: PatientAction::NewRegistration,
            identity_number: "3301000000000001".to_string(),
            patient_details: Some(
                "Registrasi pasien baru.\nNama: Ani\nTanggal Lahir: 1990-01-01\nAlamat: Jl. A"
                    .to_string(),
            ),
        };

        let result = exec.execute(&call).await.unwrap();
        assert_eq!(result["status"], "success");
        assert!(result["message"].as_str().unwrap().contains("Ani"));
        assert!(result["new_record_number"]
            .as_str()
            .unwrap()
            .starts_with("RM-"));

        let patients = exec.store().list_patients().await.unwrap();
        assert_eq!(patients.len(), 1);
        assert_eq!(patients[0].name, "Ani");
        assert_eq!(patients[0].birth_date, "1990-01-01");
        assert_eq!(patients[0].address, "Jl. A");
        assert_eq!(patients[0].status, CareStatus::Outpatient);
    }

    #[tokio::test]
    async fn test_registration_uses_placeholders_on_missing_fields() {
        let exec = executor();
        let call = ToolCall::PatientDataManagement {
            action: PatientAction::NewRegistration,
            identity_number: "3301000000000001".to_string(),
            patient_details: None,
        };

        let result = exec.execute(&call).await.unwrap();
        assert_eq!(result["status"], "success");

        let patients = exec.store().list_patients().await.unwrap();
        assert_eq!(patients[0].name, "New Patient");
        assert_eq!(patients[0].birth_date, "2000-01-01");
        assert_eq!(patients[0].address, "Address incomplete");
    }

    #[tokio::test]
    async fn test_care_status_check_found_and_missing() {
        let exec = seeded_executor();

        let found = exec
            .execute(&ToolCall::PatientDataManagement {
                action: PatientAction::CareStatusCheck,
                identity_number: "RM-3921".to_string(),
                patient_details: None,
            })
            .await
            .unwrap();
        assert_eq!(found["status"], "found");
        assert_eq!(found["name"], "Budi Santoso");
        assert_eq!(found["care_status"], "Inpatient");

        let missing = exec
            .execute(&ToolCall::PatientDataManagement {
                action: PatientAction::CareStatusCheck,
                identity_number: "RM-0000".to_string(),
                patient_details: None,
            })
            .await
            .unwrap();
        assert_eq!(missing["status"], "not_found");
    }

    #[tokio::test]
    async fn test_doctor_schedule_check_falls_back_to_general_practitioner() {
        let exec = seeded_executor();

        let known = exec
            .execute(&ToolCall::MedicalScheduling {
                service: SchedulingService::DoctorScheduleCheck,
                subject: "Cardiology".to_string(),
                schedule_time: "today".to_string(),
                patient_identity: None,
            })
            .await
            .unwrap();
        assert!(known["message"].as_str().unwrap().contains("Budi Hartono"));

        let unknown = exec
            .execute(&ToolCall::MedicalScheduling {
                service: SchedulingService::DoctorScheduleCheck,
                subject: "Dermatology".to_string(),
                schedule_time: "today".to_string(),
                patient_identity: None,
            })
            .await
            .unwrap();
        assert!(unknown["message"]
            .as_str()
            .unwrap()
            .contains("general practitioner"));
        assert_eq!(unknown["slots"][0], "09:00");
    }

    #[tokio::test]
    async fn test_appointment_booking_is_stateless() {
        let exec = executor();
        let result = exec
            .execute(&ToolCall::MedicalScheduling {
                service: SchedulingService::AppointmentBooking,
                subject: "Dr. Specialist".to_string(),
                schedule_time: "tomorrow morning".to_string(),
                patient_identity: None,
            })
            .await
            .unwrap();

        assert_eq!(result["status"], "confirmed");
        assert!(result["booking_code"].as_str().unwrap().starts_with("BOOK-"));
        assert!(result["info"].as_str().unwrap().contains("Dr. Specialist"));
        // Nothing persisted.
        assert!(exec.store().list_patients().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_medical_information_never_touches_store() {
        let exec = executor();
        let result = exec
            .execute(&ToolCall::GeneralMedicalInformation {
                topic: "dengue fever".to_string(),
                source_priority: None,
            })
            .await
            .unwrap();

        assert!(result["content"].as_str().unwrap().contains("dengue fever"));
        assert_eq!(result["reference"], "Hospital Clinical Guideline");
    }

    #[tokio::test]
    async fn test_billing_check_fixed_breakdown() {
        let exec = executor();
        let result = exec
            .execute(&ToolCall::HospitalAdministration {
                category: AdminCategory::BillingCheck,
                reference: Some("INV-123".to_string()),
                period: None,
            })
            .await
            .unwrap();

        assert_eq!(result["invoice_id"], "INV-123");
        assert_eq!(result["total"], "Rp 4.500.000");
        assert_eq!(result["status"], "Unpaid");
        assert_eq!(result["line_items"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_unknown_capability_is_result_level_error() {
        let exec = executor();
        let result = exec.execute_raw("not_a_tool", "{}").await;
        assert_eq!(result["error"], "capability not recognized");
    }

    #[tokio::test]
    async fn test_malformed_arguments_are_result_level_errors() {
        let exec = executor();
        let result = exec.execute_raw("general_medical_information", "{").await;
        assert!(result["error"].as_str().is_some());

        let result = exec.execute_raw("general_medical_information", "{}").await;
        assert!(result["error"].as_str().unwrap().contains("topic"));
    }
}
