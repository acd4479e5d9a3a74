//! Appointments domain layer: request and confirmation entities

pub mod entities;
