//! Lab tests domain layer: booking entities

pub mod entities;
