//! Emergency domain layer: request and dispatch entities

pub mod entities;
