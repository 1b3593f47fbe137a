//! Capability (sub-agent) schemas and tool-call parsing.
//!
//! The four capabilities are a closed set; each variant carries its own
//! sub-kind enum so dispatch in the executor is exhaustive at compile time.

use crate::error::{MedikaError, Result};
use serde::{Deserialize, Serialize};

/// Sub-kinds of the patient data management capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatientAction {
    NewRegistration,
    DataUpdate,
    CareStatusCheck,
    MedicalRecordRetrieval,
}

/// Sub-kinds of the medical scheduling capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchedulingService {
    AppointmentBooking,
    DoctorScheduleCheck,
    FacilityAvailabilityCheck,
}

/// Sub-kinds of the hospital administration capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdminCategory {
    BillingCheck,
    InsuranceClaim,
    FinancialReport,
    AssetManagement,
    InventoryCheck,
}

/// A routed request to one of the four capabilities.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum ToolCall {
    /// Patient registration, updates, care status, and medical records.
    PatientDataManagement {
        action: PatientAction,
        /// NIK or record number.
        identity_number: String,
        /// Free-text detail blob (the registration field extractor runs on it).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        patient_details: Option<String>,
    },

    /// Doctor schedules, appointments, and facility availability.
    MedicalScheduling {
        service: SchedulingService,
        /// Doctor name, specialty, or facility.
        subject: String,
        schedule_time: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        patient_identity: Option<String>,
    },

    /// General medical information, health guidance, clinical SOPs.
    GeneralMedicalInformation {
        topic: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        source_priority: Option<String>,
    },

    /// Back-office functions: billing, insurance, finance, assets.
    HospitalAdministration {
        category: AdminCategory,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reference: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        period: Option<String>,
    },
}

/// Wire names of the four capabilities.
pub const CAPABILITY_NAMES: [&str; 4] = [
    "patient_data_management",
    "medical_scheduling",
    "general_medical_information",
    "hospital_administration",
];

impl ToolCall {
    /// Wire name of the capability this call targets.
    pub fn name(&self) -> &'static str {
        match self {
            ToolCall::PatientDataManagement { .. } => "patient_data_management",
            ToolCall::MedicalScheduling { .. } => "medical_scheduling",
            ToolCall::GeneralMedicalInformation { .. } => "general_medical_information",
            ToolCall::HospitalAdministration { .. } => "hospital_administration",
        }
    }

    /// Argument bag as a JSON object, without the capability name tag.
    pub fn arguments(&self) -> serde_json::Value {
        let mut value = serde_json::to_value(self).unwrap_or_default();
        if let Some(obj) = value.as_object_mut() {
            obj.remove("name");
        }
        value
    }
}

/// OpenAI function/tool definitions for the four capabilities.
pub fn tool_definitions() -> Vec<async_openai::types::ChatCompletionTool> {
    use async_openai::types::{ChatCompletionTool, ChatCompletionToolType, FunctionObject};

    vec![
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "patient_data_management".to_string(),
                description: Some(
                    "Handles patient data management: registration, updates, \
                    care status checks, and medical record retrieval."
                        .to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "action": {
                            "type": "string",
                            "description": "Kind of action to perform",
                            "enum": ["NewRegistration", "DataUpdate", "CareStatusCheck", "MedicalRecordRetrieval"]
                        },
                        "identity_number": {
                            "type": "string",
                            "description": "NIK or medical record number (RM number)"
                        },
                        "patient_details": {
                            "type": "string",
                            "description": "Detail data to record or change (e.g. new address, birth date)"
                        }
                    },
                    "required": ["action", "identity_number"]
                })),
                strict: None,
            },
        },
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "medical_scheduling".to_string(),
                description: Some(
                    "Manages doctor schedules, appointments, and facility/room availability."
                        .to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "service": {
                            "type": "string",
                            "description": "Service focus",
                            "enum": ["AppointmentBooking", "DoctorScheduleCheck", "FacilityAvailabilityCheck"]
                        },
                        "subject": {
                            "type": "string",
                            "description": "Doctor name, specialty, or facility (e.g. Dr. Agung, Cardiology Clinic)"
                        },
                        "schedule_time": {
                            "type": "string",
                            "description": "Specific date and time"
                        },
                        "patient_identity": {
                            "type": "string",
                            "description": "Patient record number if booking an appointment"
                        }
                    },
                    "required": ["service", "subject", "schedule_time"]
                })),
                strict: None,
            },
        },
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "general_medical_information".to_string(),
                description: Some(
                    "Provides general medical information, health guidance, and clinical SOPs."
                        .to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "topic": {
                            "type": "string",
                            "description": "Medical topic or term to look up"
                        },
                        "source_priority": {
                            "type": "string",
                            "description": "Preferred source (Clinical Guideline, Patient Education, General)"
                        }
                    },
                    "required": ["topic"]
                })),
                strict: None,
            },
        },
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "hospital_administration".to_string(),
                description: Some(
                    "Handles back-office functions: billing, insurance, finance, and assets."
                        .to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "category": {
                            "type": "string",
                            "description": "Administrative category",
                            "enum": ["BillingCheck", "InsuranceClaim", "FinancialReport", "AssetManagement", "InventoryCheck"]
                        },
                        "reference": {
                            "type": "string",
                            "description": "Invoice number, insurer name, asset name, or report kind"
                        },
                        "period": {
                            "type": "string",
                            "description": "Relevant time period"
                        }
                    },
                    "required": ["category"]
                })),
                strict: None,
            },
        },
    ]
}

/// Parse a tool call from the provider's function-call format.
pub fn parse_tool_call(name: &str, arguments: &str) -> Result<ToolCall> {
    let args: serde_json::Value = serde_json::from_str(arguments)
        .map_err(|e| MedikaError::Agent(format!("Invalid tool arguments: {}", e)))?;

    match name {
        "patient_data_management" => Ok(ToolCall::PatientDataManagement {
            action: parse_kind(&args, "action")?,
            identity_number: required_str(&args, "identity_number")?,
            patient_details: optional_str(&args, "patient_details"),
        }),
        "medical_scheduling" => Ok(ToolCall::MedicalScheduling {
            service: parse_kind(&args, "service")?,
            subject: required_str(&args, "subject")?,
            schedule_time: required_str(&args, "schedule_time")?,
            patient_identity: optional_str(&args, "patient_identity"),
        }),
        "general_medical_information" => Ok(ToolCall::GeneralMedicalInformation {
            topic: required_str(&args, "topic")?,
            source_priority: optional_str(&args, "source_priority"),
        }),
        "hospital_administration" => Ok(ToolCall::HospitalAdministration {
            category: parse_kind(&args, "category")?,
            reference: optional_str(&args, "reference"),
            period: optional_str(&args, "period"),
        }),
        _ => Err(MedikaError::Agent(format!("Unknown tool: {}", name))),
    }
}

fn required_str(args: &serde_json::Value, key: &str) -> Result<String> {
    args[key]
        .as_str()
        .map(|s| s.to_string())
        .ok_or_else(|| MedikaError::Agent(format!("Missing '{}' argument", key)))
}

fn optional_str(args: &serde_json::Value, key: &str) -> Option<String> {
    args[key].as_str().map(|s| s.to_string())
}

fn parse_kind<T: serde::de::DeserializeOwned>(args: &serde_json::Value, key: &str) -> Result<T> {
    let raw = args[key]
        .as_str()
        .ok_or_else(|| MedikaError::Agent(format!("Missing '{}' argument", key)))?;
    serde_json::from_value(serde_json::Value::String(raw.to_string()))
        .map_err(|_| MedikaError::Agent(format!("Unknown {} value: {}", key, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_registration_tool() {
        let call = parse_tool_call(
            "patient_data_management",
            r#"{"action": "NewRegistration", "identity_number": "3301000000000001", "patient_details": "Nama: Ani"}"#,
        )
        .unwrap();
        match call {
            ToolCall::PatientDataManagement {
                action,
                identity_number,
                patient_details,
            } => {
                assert_eq!(action, PatientAction::NewRegistration);
                assert_eq!(identity_number, "3301000000000001");
                assert_eq!(patient_details.as_deref(), Some("Nama: Ani"));
            }
            _ => panic!("Expected PatientDataManagement"),
        }
    }

    #[test]
    fn test_parse_scheduling_tool() {
        let call = parse_tool_call(
            "medical_scheduling",
            r#"{"service": "DoctorScheduleCheck", "subject": "Cardiology", "schedule_time": "today"}"#,
        )
        .unwrap();
        match call {
            ToolCall::MedicalScheduling { service, subject, .. } => {
                assert_eq!(service, SchedulingService::DoctorScheduleCheck);
                assert_eq!(subject, "Cardiology");
            }
            _ => panic!("Expected MedicalScheduling"),
        }
    }

    #[test]
    fn test_parse_missing_required_field() {
        let err = parse_tool_call("general_medical_information", r#"{}"#).unwrap_err();
        assert!(err.to_string().contains("topic"));
    }

    #[test]
    fn test_parse_unknown_sub_kind() {
        let err = parse_tool_call(
            "hospital_administration",
            r#"{"category": "SomethingElse"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("SomethingElse"));
    }

    #[test]
    fn test_parse_unknown_tool() {
        assert!(parse_tool_call("not_a_tool", "{}").is_err());
    }

    #[test]
    fn test_name_and_arguments_round_trip() {
        let call = ToolCall::GeneralMedicalInformation {
            topic: "dengue fever".to_string(),
            source_priority: None,
        };
        assert_eq!(call.name(), "general_medical_information");

        let args = call.arguments();
        assert_eq!(args["topic"], "dengue fever");
        assert!(args.get("name").is_none());
    }

    #[test]
    fn test_definitions_cover_all_capabilities() {
        let defs = tool_definitions();
        let names: Vec<_> = defs.iter().map(|d| d.function.name.as_str()).collect();
        assert_eq!(names, CAPABILITY_NAMES);
    }
}
