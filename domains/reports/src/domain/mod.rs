//! Reports domain layer: upload entity, upload state machine

pub mod entities;
pub mod state;
