//! Emergency domain: ambulance requests and mock dispatch

pub mod domain;
pub mod flow;

pub use domain::entities::{EmergencyDispatch, EmergencyRequest};
pub use flow::{EmergencyFlow, EMERGENCY_ACTION};
