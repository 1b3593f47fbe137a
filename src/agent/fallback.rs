//! Deterministic fallback router.
//!
//! When the external model path is unavailable the session classifies the
//! request locally: an ordered, first-match-wins list of keyword rules over
//! the lowercased input. Earlier rules win even when several match, so the
//! rule order here is load-bearing. No tokenization, stemming, or scoring.
//!
//! Operators phrase requests in Indonesian or English, so each rule carries
//! both keyword sets.

use super::extract;
use super::tools::{AdminCategory, PatientAction, SchedulingService, ToolCall};

/// Identity placeholder when a registration request carries no NIK.
const FALLBACK_IDENTITY: &str = "3301000000000001";

/// A fallback classification: the routed call plus a lead-in sentence used
/// to open the synthesized narration.
#[derive(Debug, Clone)]
pub struct FallbackRoute {
    pub call: ToolCall,
    pub lead_in: String,
}

/// Classify free text into a capability call, or `None` when no rule matches.
///
/// A miss is a normal outcome: the caller asks for clarification instead of
/// guessing, mirroring the directive given to the external model.
pub fn classify(text: &str) -> Option<FallbackRoute> {
    let msg = text.to_lowercase();

    // Rule 1: explicit patient registration.
    if (contains_any(&msg, &["registrasi", "register", "registration"])
        && contains_any(&msg, &["pasien", "patient"]))
        || msg.contains("patient_data_management")
    {
        let identity = extract::identity_number(text)
            .unwrap_or_else(|| FALLBACK_IDENTITY.to_string());
        let who = extract::patient_name(text).unwrap_or_else(|| "a new patient".to_string());
        return Some(FallbackRoute {
            call: ToolCall::PatientDataManagement {
                action: PatientAction::NewRegistration,
                identity_number: identity,
                // Full original text, so field extraction runs in the executor.
                patient_details: Some(text.to_string()),
            },
            lead_in: format!(
                "Registration request received. Processing the data for {}.",
                who
            ),
        });
    }

    // Rule 2: medical record lookup.
    if contains_any(
        &msg,
        &["rekam medis", "medical record", "riwayat", "history", "cari data"],
    ) {
        return Some(FallbackRoute {
            call: ToolCall::PatientDataManagement {
                action: PatientAction::MedicalRecordRetrieval,
                identity_number: "RM-UNKNOWN".to_string(),
                patient_details: None,
            },
            lead_in: "Looking up the patient's medical records...".to_string(),
        });
    }

    // Rule 3: care status.
    if contains_any(
        &msg,
        &["cek status", "status check", "rawat", "inpatient", "kamar berapa", "which room"],
    ) {
        return Some(FallbackRoute {
            call: ToolCall::PatientDataManagement {
                action: PatientAction::CareStatusCheck,
                identity_number: "RM-0000".to_string(),
                patient_details: None,
            },
            lead_in: "Checking the patient's care status...".to_string(),
        });
    }

    // Rule 4: doctor schedules.
    if contains_any(
        &msg,
        &["jadwal", "schedule", "praktek", "practice", "dokter", "doctor"],
    ) {
        return Some(FallbackRoute {
            call: ToolCall::MedicalScheduling {
                service: SchedulingService::DoctorScheduleCheck,
                subject: "general practitioner".to_string(),
                schedule_time: "today".to_string(),
                patient_identity: None,
            },
            lead_in: "Checking which doctors are available today...".to_string(),
        });
    }

    // Rule 5: appointments.
    if contains_any(&msg, &["janji temu", "appointment", "booking"]) {
        return Some(FallbackRoute {
            call: ToolCall::MedicalScheduling {
                service: SchedulingService::AppointmentBooking,
                subject: "Dr. Specialist".to_string(),
                schedule_time: "tomorrow morning".to_string(),
                patient_identity: None,
            },
            lead_in: "Processing the appointment booking...".to_string(),
        });
    }

    // Rule 6: rooms and facilities.
    if contains_any(
        &msg,
        &["kamar", "room", "kosong", "vacancy", "vip", "fasilitas", "facility"],
    ) {
        return Some(FallbackRoute {
            call: ToolCall::MedicalScheduling {
                service: SchedulingService::FacilityAvailabilityCheck,
                subject: "inpatient ward".to_string(),
                schedule_time: "now".to_string(),
                patient_identity: None,
            },
            lead_in: "Checking hospital facility availability...".to_string(),
        });
    }

    // Rule 7: general medical information.
    if contains_any(
        &msg,
        &["sop", "gejala", "symptom", "obat", "medication", "sakit", "illness", "penanganan", "treatment"],
    ) {
        return Some(FallbackRoute {
            call: ToolCall::GeneralMedicalInformation {
                topic: text.to_string(),
                source_priority: Some("Standard Hospital Protocol".to_string()),
            },
            lead_in: "Searching the hospital knowledge base...".to_string(),
        });
    }

    // Rule 8: billing.
    if contains_any(&msg, &["tagihan", "invoice", "billing", "bayar", "payment"]) {
        return Some(FallbackRoute {
            call: ToolCall::HospitalAdministration {
                category: AdminCategory::BillingCheck,
                reference: Some("INV-LATEST".to_string()),
                period: Some("current".to_string()),
            },
            lead_in: "Retrieving the patient's billing data...".to_string(),
        });
    }

    // Rule 9: financial reports.
    if contains_any(&msg, &["laporan", "report", "keuangan", "finance", "financial"]) {
        return Some(FallbackRoute {
            call: ToolCall::HospitalAdministration {
                category: AdminCategory::FinancialReport,
                reference: Some("General Ledger".to_string()),
                period: Some("this month".to_string()),
            },
            lead_in: "Preparing the financial report summary...".to_string(),
        });
    }

    None
}

fn contains_any(msg: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| msg.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_keywords_returns_none() {
        assert!(classify("halo apa kabar").is_none());
        assert!(classify("tell me a joke").is_none());
        assert!(classify("").is_none());
    }

    #[test]
    fn test_registration_rule_passes_full_text_through() {
        let text = "Registrasi pasien baru.\nNama: Ani\nTanggal Lahir: 1990-01-01\nAlamat: Jl. A";
        let route = classify(text).unwrap();

        match route.call {
            ToolCall::PatientDataManagement {
                action,
                identity_number,
                patient_details,
            } => {
                assert_eq!(action, PatientAction::NewRegistration);
                assert_eq!(identity_number, FALLBACK_IDENTITY);
                assert_eq!(patient_details.as_deref(), Some(text));
            }
            _ => panic!("Expected registration"),
        }
        assert!(route.lead_in.contains("Ani"));
    }

    #[test]
    fn test_registration_extracts_nik_when_present() {
        let route = classify("Register patient, NIK: 3301123456789012").unwrap();
        match route.call {
            ToolCall::PatientDataManagement { identity_number, .. } => {
                assert_eq!(identity_number, "3301123456789012");
            }
            _ => panic!("Expected registration"),
        }
    }

    #[test]
    fn test_registration_wins_over_schedule() {
        // Matches rule 1 and rule 4 keywords at once; rule 1 must win.
        let route = classify("Tolong registrasi pasien baru lalu cek jadwal dokter").unwrap();
        assert!(matches!(
            route.call,
            ToolCall::PatientDataManagement {
                action: PatientAction::NewRegistration,
                ..
            }
        ));
    }

    #[test]
    fn test_doctor_schedule_rule() {
        let route = classify("Siapa dokter yang praktek hari ini?").unwrap();
        match route.call {
            ToolCall::MedicalScheduling {
                service,
                subject,
                schedule_time,
                ..
            } => {
                assert_eq!(service, SchedulingService::DoctorScheduleCheck);
                assert_eq!(subject, "general practitioner");
                assert_eq!(schedule_time, "today");
            }
            _ => panic!("Expected scheduling"),
        }
    }

    #[test]
    fn test_medical_record_rule_beats_schedule() {
        let route = classify("cari data rekam medis dokter").unwrap();
        assert!(matches!(
            route.call,
            ToolCall::PatientDataManagement {
                action: PatientAction::MedicalRecordRetrieval,
                ..
            }
        ));
    }

    #[test]
    fn test_care_status_rule() {
        let route = classify("cek status rawat inap pasien kamar berapa").unwrap();
        // "pasien" appears, but rule 1 needs a registration token too.
        assert!(matches!(
            route.call,
            ToolCall::PatientDataManagement {
                action: PatientAction::CareStatusCheck,
                ..
            }
        ));
    }

    #[test]
    fn test_appointment_rule() {
        let route = classify("I want to make a booking").unwrap();
        assert!(matches!(
            route.call,
            ToolCall::MedicalScheduling {
                service: SchedulingService::AppointmentBooking,
                ..
            }
        ));
    }

    #[test]
    fn test_facility_rule() {
        let route = classify("ada kamar vip kosong?").unwrap();
        assert!(matches!(
            route.call,
            ToolCall::MedicalScheduling {
                service: SchedulingService::FacilityAvailabilityCheck,
                ..
            }
        ));
    }

    #[test]
    fn test_medical_information_uses_full_text_as_topic() {
        let text = "Bagaimana penanganan awal demam berdarah?";
        let route = classify(text).unwrap();
        match route.call {
            ToolCall::GeneralMedicalInformation { topic, .. } => assert_eq!(topic, text),
            _ => panic!("Expected medical information"),
        }
    }

    #[test]
    fn test_billing_rule() {
        let route = classify("berapa tagihan saya?").unwrap();
        assert!(matches!(
            route.call,
            ToolCall::HospitalAdministration {
                category: AdminCategory::BillingCheck,
                ..
            }
        ));
    }

    #[test]
    fn test_financial_report_rule() {
        let route = classify("tolong siapkan laporan keuangan").unwrap();
        assert!(matches!(
            route.call,
            ToolCall::HospitalAdministration {
                category: AdminCategory::FinancialReport,
                ..
            }
        ));
    }

    #[test]
    fn test_classification_is_deterministic() {
        let a = classify("Siapa dokter yang praktek hari ini?").unwrap();
        let b = classify("Siapa dokter yang praktek hari ini?").unwrap();
        assert_eq!(a.call.name(), b.call.name());
        assert_eq!(a.lead_in, b.lead_in);
    }
}
