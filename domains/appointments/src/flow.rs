//! Appointment booking flow

use std::sync::Arc;

use chrono::{Days, NaiveDate};

use medai_common::{validate_request, Config, Error, Result};
use medai_fixtures::{Doctor, FixtureStore};
use medai_sim::{
    ActionFailure, Completion, DelayedResponder, Responder, SubmissionFlow, SubmissionState,
};

use crate::domain::entities::{AppointmentConfirmation, AppointmentRequest};

/// Action name used in logs and errors
pub const APPOINTMENT_ACTION: &str = "appointment_booking";

/// Number of bookable days offered, starting today
const BOOKABLE_DAYS: u64 = 7;

/// Bookable dates: today and the six days after it
pub fn date_options(today: NaiveDate) -> Vec<NaiveDate> {
    (0..BOOKABLE_DAYS)
        .filter_map(|offset| today.checked_add_days(Days::new(offset)))
        .collect()
}

/// Resolve a booking against the doctor roster
fn confirm(request: AppointmentRequest) -> std::result::Result<AppointmentConfirmation, ActionFailure> {
    let doctor = FixtureStore::global()
        .doctor(&request.doctor_id)
        .cloned()
        .ok_or_else(|| ActionFailure::Rejected(format!("unknown doctor {}", request.doctor_id)))?;
    Ok(AppointmentConfirmation::new(doctor, request))
}

/// Doctor selection, booking submission and "book another"
#[derive(Debug)]
pub struct AppointmentFlow {
    flow: SubmissionFlow<AppointmentRequest, AppointmentConfirmation>,
}

impl AppointmentFlow {
    pub fn new(responder: Arc<dyn Responder<AppointmentRequest, AppointmentConfirmation>>) -> Self {
        Self {
            flow: SubmissionFlow::new(APPOINTMENT_ACTION, responder),
        }
    }

    /// Flow confirming from fixtures after the configured delay
    pub fn simulated(config: &Config) -> Self {
        let responder = DelayedResponder::new(config.appointment_delay(), confirm).with_config(config);
        Self::new(Arc::new(responder))
    }

    pub fn doctors(&self) -> &'static [Doctor] {
        FixtureStore::global().doctors()
    }

    pub fn time_slots(&self) -> &'static [&'static str] {
        FixtureStore::global().time_slots()
    }

    pub fn state(&self) -> SubmissionState {
        self.flow.state()
    }

    /// Validate and submit a booking.
    ///
    /// Returns `Validation` for malformed fields and `NotFound` for an
    /// unknown doctor; neither starts the action.
    pub fn submit(&self, request: AppointmentRequest) -> Result<Completion<AppointmentConfirmation>> {
        validate_request(&request)?;

        if FixtureStore::global().doctor(&request.doctor_id).is_none() {
            return Err(Error::NotFound(format!(
                "Doctor {} not found",
                request.doctor_id
            )));
        }

        tracing::info!(
            doctor_id = %request.doctor_id,
            date = %request.date,
            time_slot = %request.time_slot,
            "Appointment requested"
        );

        self.flow.submit(request)
    }

    pub fn confirmation(&self) -> Option<AppointmentConfirmation> {
        self.flow.outcome()
    }

    pub fn last_failure(&self) -> Option<ActionFailure> {
        self.flow.last_failure()
    }

    /// Return to doctor selection after a confirmation or failure
    pub fn book_another(&self) -> Result<()> {
        self.flow.reset()
    }

    pub fn cancel(&self) -> Result<bool> {
        self.flow.cancel()
    }
}
