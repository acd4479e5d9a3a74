//! Fixture store: static, versionless reference data
//!
//! Everything here stands in for a backend response. Data is built once per
//! process and never mutated; every read borrows from the same static, so
//! repeated reads return the same values in the same order.

pub mod catalog;
pub mod content;

pub use catalog::{Doctor, LabTest, TIME_SLOTS};
pub use content::{CannedResponse, ReportAnalysis, MOCK_LOCATION};

lazy_static::lazy_static! {
    static ref STORE: FixtureStore = FixtureStore {
        doctors: catalog::doctor_roster(),
        lab_tests: catalog::lab_catalog(),
        report_analysis: content::canned_analysis(),
    };
}

/// Read-only view over the process-wide fixtures
#[derive(Debug)]
pub struct FixtureStore {
    doctors: Vec<Doctor>,
    lab_tests: Vec<LabTest>,
    report_analysis: ReportAnalysis,
}

impl FixtureStore {
    /// The shared store; outlives every session
    pub fn global() -> &'static FixtureStore {
        &STORE
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn doctor(&self, id: &str) -> Option<&Doctor> {
        self.doctors.iter().find(|d| d.id == id)
    }

    pub fn lab_tests(&self) -> &[LabTest] {
        &self.lab_tests
    }

    pub fn lab_test(&self, id: &str) -> Option<&LabTest> {
        self.lab_tests.iter().find(|t| t.id == id)
    }

    pub fn time_slots(&self) -> &'static [&'static str] {
        TIME_SLOTS
    }

    pub fn is_time_slot(&self, label: &str) -> bool {
        TIME_SLOTS.contains(&label)
    }

    pub fn canned(&self, response: CannedResponse) -> &'static str {
        response.text()
    }

    pub fn report_analysis(&self) -> &ReportAnalysis {
        &self.report_analysis
    }

    pub fn mock_location(&self) -> &'static str {
        MOCK_LOCATION
    }
}
