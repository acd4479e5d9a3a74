//! Appointments domain: doctor booking requests and confirmations

pub mod domain;
pub mod flow;

pub use domain::entities::{AppointmentConfirmation, AppointmentRequest};
pub use flow::{date_options, AppointmentFlow, APPOINTMENT_ACTION};
