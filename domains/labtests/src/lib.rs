//! Lab tests domain: home sample collection bookings

pub mod domain;
pub mod flow;

pub use domain::entities::{LabTestBookingRequest, LabTestConfirmation};
pub use flow::{LabTestFlow, LAB_BOOKING_ACTION};
