//! Domain entities for the Emergency domain

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Shown with every dispatch; the portal never reaches real services
pub const EMERGENCY_ADVISORY: &str =
    "If this is a real emergency, call local emergency services (e.g. 911) immediately.";

const DISPATCH_MESSAGE: &str = "Request Received. In production, the nearest ambulance would be \
notified. For now this is a mock confirmation.";

/// Request for an ambulance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct EmergencyRequest {
    #[validate(length(min = 2, message = "Name is required"))]
    pub patient_name: String,

    #[validate(range(min = 1, max = 120, message = "Age must be between 1 and 120"))]
    pub age: u32,

    #[validate(length(min = 10, message = "Please describe the emergency"))]
    pub description: String,
}

/// Mock dispatch confirmation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyDispatch {
    /// Short human-readable reference, e.g. `EMG-1A2B3C4D`
    pub reference: String,
    pub patient_name: String,
    pub location: String,
    pub message: String,
    pub advisory: String,
    pub received_at: DateTime<Utc>,
}

impl EmergencyDispatch {
    pub fn new(request: EmergencyRequest, location: &str) -> Self {
        let id = Uuid::new_v4().simple().to_string();
        Self {
            reference: format!("EMG-{}", id[..8].to_uppercase()),
            patient_name: request.patient_name,
            location: location.to_string(),
            message: DISPATCH_MESSAGE.to_string(),
            advisory: EMERGENCY_ADVISORY.to_string(),
            received_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(age: u32) -> EmergencyRequest {
        EmergencyRequest {
            patient_name: "Ada Obi".to_string(),
            age,
            description: "Severe chest pain and shortness of breath".to_string(),
        }
    }

    #[test]
    fn test_age_bounds() {
        assert!(request(0).validate().is_err());
        assert!(request(1).validate().is_ok());
        assert!(request(120).validate().is_ok());
        assert!(request(121).validate().is_err());
    }

    #[test]
    fn test_name_and_description_lengths() {
        let short_name = EmergencyRequest {
            patient_name: "A".to_string(),
            ..request(30)
        };
        assert!(short_name.validate().is_err());

        let short_description = EmergencyRequest {
            description: "pain".to_string(),
            ..request(30)
        };
        let errors = short_description.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("description"));
    }

    #[test]
    fn test_dispatch_reference_format() {
        let dispatch = EmergencyDispatch::new(request(30), "123 Main St, City (Mock)");

        assert!(dispatch.reference.starts_with("EMG-"));
        assert_eq!(dispatch.reference.len(), 12);
        assert_eq!(dispatch.location, "123 Main St, City (Mock)");
        assert_eq!(dispatch.patient_name, "Ada Obi");
        assert!(dispatch.message.starts_with("Request Received"));
    }

    #[test]
    fn test_dispatch_references_differ() {
        let a = EmergencyDispatch::new(request(30), "here");
        let b = EmergencyDispatch::new(request(30), "here");
        assert_ne!(a.reference, b.reference);
    }

    #[test]
    fn test_request_deserializes_from_form_json() {
        let request: EmergencyRequest = serde_json::from_str(
            r#"{"patient_name":"Ada","age":42,"description":"Fell down the stairs"}"#,
        )
        .unwrap();
        assert_eq!(request.age, 42);
        assert!(request.validate().is_ok());
    }
}
