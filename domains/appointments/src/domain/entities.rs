//! Domain entities for the Appointments domain

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use medai_fixtures::{Doctor, FixtureStore};

/// Request for booking a doctor appointment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct AppointmentRequest {
    /// Fixture doctor id (e.g. `doc-2`)
    #[validate(length(min = 1, message = "Select a doctor"))]
    pub doctor_id: String,

    /// Requested day, serialized as `YYYY-MM-DD`
    pub date: NaiveDate,

    /// One of the fixture time slot labels
    #[validate(custom(function = "validate_time_slot", message = "Select a time"))]
    pub time_slot: String,

    #[validate(length(min = 10, message = "Describe your concern (min 10 chars)"))]
    pub description: String,
}

fn validate_time_slot(slot: &str) -> Result<(), validator::ValidationError> {
    if FixtureStore::global().is_time_slot(slot) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("unknown_time_slot"))
    }
}

/// Mock confirmation shown once the booking resolves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentConfirmation {
    pub doctor: Doctor,
    pub date: NaiveDate,
    pub time_slot: String,
    pub fee: Decimal,
    pub message: String,
}

impl AppointmentConfirmation {
    pub fn new(doctor: Doctor, request: AppointmentRequest) -> Self {
        let fee = doctor.fee;
        Self {
            message: format!(
                "Appointment request submitted. Consultation fee: ${} (mock).",
                fee
            ),
            doctor,
            date: request.date,
            time_slot: request.time_slot,
            fee,
        }
    }
}
