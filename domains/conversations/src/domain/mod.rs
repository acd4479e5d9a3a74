//! Conversations domain layer: entities, state machine

pub mod entities;
pub mod state;
