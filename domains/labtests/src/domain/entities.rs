//! Domain entities for the Lab tests domain

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use medai_fixtures::{FixtureStore, LabTest};

/// Request for a home sample collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct LabTestBookingRequest {
    /// Fixture lab test id (e.g. `lab-3`)
    #[validate(length(min = 1, message = "Select a test"))]
    pub test_id: String,

    /// Collection day, serialized as `YYYY-MM-DD`
    pub date: NaiveDate,

    #[validate(custom(function = "validate_time_slot", message = "Select a time"))]
    pub time_slot: String,

    /// Collection address
    #[validate(length(min = 5, message = "Enter a collection address"))]
    pub address: String,
}

fn validate_time_slot(slot: &str) -> Result<(), validator::ValidationError> {
    if FixtureStore::global().is_time_slot(slot) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("unknown_time_slot"))
    }
}

/// Mock booking confirmation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabTestConfirmation {
    pub test: LabTest,
    pub date: NaiveDate,
    pub time_slot: String,
    pub address: String,
    pub price: Decimal,
    pub message: String,
}

impl LabTestConfirmation {
    pub fn new(test: LabTest, request: LabTestBookingRequest) -> Self {
        let price = test.price;
        Self {
            message: format!(
                "Sample collection booked for {} at {}. Price: ${} (mock).",
                request.date, request.time_slot, price
            ),
            test,
            date: request.date,
            time_slot: request.time_slot,
            address: request.address,
            price,
        }
    }
}
