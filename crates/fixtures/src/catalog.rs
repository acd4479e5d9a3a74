//! Bookable catalog: doctor roster, lab tests, time slots

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A doctor available for consultation booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub specialization: String,
    pub experience_years: u8,
    /// Patient rating in [0, 5]
    pub rating: f32,
    /// Consultation fee, unit-agnostic
    pub fee: Decimal,
}

impl Doctor {
    fn new(
        id: &str,
        name: &str,
        specialization: &str,
        experience_years: u8,
        rating: f32,
        fee: i64,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            specialization: specialization.to_string(),
            experience_years,
            rating,
            fee: Decimal::from(fee),
        }
    }

    /// Human-readable experience, e.g. "12 years"
    pub fn experience_label(&self) -> String {
        format!("{} years", self.experience_years)
    }
}

/// A lab test that can be booked for home collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabTest {
    pub id: String,
    pub name: String,
    pub price: Decimal,
}

impl LabTest {
    fn new(id: &str, name: &str, price: i64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            price: Decimal::from(price),
        }
    }
}

/// Bookable time-slot labels, in display order
pub const TIME_SLOTS: &[&str] = &[
    "09:00 AM", "10:00 AM", "11:00 AM", "02:00 PM", "03:00 PM", "04:00 PM", "05:00 PM",
];

pub(crate) fn doctor_roster() -> Vec<Doctor> {
    vec![
        Doctor::new("doc-1", "Dr. Sarah Chen", "General Physician", 12, 4.9, 25),
        Doctor::new("doc-2", "Dr. James Wilson", "Cardiologist", 15, 4.8, 45),
        Doctor::new("doc-3", "Dr. Priya Sharma", "Dermatologist", 8, 4.7, 30),
        Doctor::new("doc-4", "Dr. Michael Okonkwo", "Pediatrician", 10, 4.9, 35),
    ]
}

pub(crate) fn lab_catalog() -> Vec<LabTest> {
    vec![
        LabTest::new("lab-1", "Complete Blood Count (CBC)", 15),
        LabTest::new("lab-2", "Blood Sugar (Fasting)", 10),
        LabTest::new("lab-3", "Thyroid Profile", 25),
        LabTest::new("lab-4", "Lipid Profile", 20),
        LabTest::new("lab-5", "Liver Function Test", 22),
        LabTest::new("lab-6", "Kidney Function Test", 18),
    ]
}
