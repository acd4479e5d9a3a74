//! Lab test booking flow

use std::sync::Arc;

use medai_common::{validate_request, Config, Error, Result};
use medai_fixtures::{FixtureStore, LabTest};
use medai_sim::{
    ActionFailure, Completion, DelayedResponder, Responder, SubmissionFlow, SubmissionState,
};

use crate::domain::entities::{LabTestBookingRequest, LabTestConfirmation};

/// Action name used in logs and errors
pub const LAB_BOOKING_ACTION: &str = "lab_booking";

fn book(request: LabTestBookingRequest) -> std::result::Result<LabTestConfirmation, ActionFailure> {
    let test = FixtureStore::global()
        .lab_test(&request.test_id)
        .cloned()
        .ok_or_else(|| ActionFailure::Rejected(format!("unknown lab test {}", request.test_id)))?;
    Ok(LabTestConfirmation::new(test, request))
}

/// Lab test selection and home collection booking
#[derive(Debug)]
pub struct LabTestFlow {
    flow: SubmissionFlow<LabTestBookingRequest, LabTestConfirmation>,
}

impl LabTestFlow {
    pub fn new(responder: Arc<dyn Responder<LabTestBookingRequest, LabTestConfirmation>>) -> Self {
        Self {
            flow: SubmissionFlow::new(LAB_BOOKING_ACTION, responder),
        }
    }

    /// Flow confirming from fixtures after the configured delay
    pub fn simulated(config: &Config) -> Self {
        let responder = DelayedResponder::new(config.lab_booking_delay(), book).with_config(config);
        Self::new(Arc::new(responder))
    }

    pub fn tests(&self) -> &'static [LabTest] {
        FixtureStore::global().lab_tests()
    }

    pub fn state(&self) -> SubmissionState {
        self.flow.state()
    }

    pub fn submit(&self, request: LabTestBookingRequest) -> Result<Completion<LabTestConfirmation>> {
        validate_request(&request)?;

        if FixtureStore::global().lab_test(&request.test_id).is_none() {
            return Err(Error::NotFound(format!(
                "Lab test {} not found",
                request.test_id
            )));
        }

        tracing::info!(
            test_id = %request.test_id,
            date = %request.date,
            time_slot = %request.time_slot,
            "Lab test booking requested"
        );

        self.flow.submit(request)
    }

    pub fn confirmation(&self) -> Option<LabTestConfirmation> {
        self.flow.outcome()
    }

    pub fn last_failure(&self) -> Option<ActionFailure> {
        self.flow.last_failure()
    }

    pub fn book_another(&self) -> Result<()> {
        self.flow.reset()
    }

    pub fn cancel(&self) -> Result<bool> {
        self.flow.cancel()
    }
}
