//! Shared utilities, configuration, and error handling for the MedAI portal
//!
//! This crate provides common functionality used across the portal crates:
//! - Configuration management following 12-factor principles
//! - Error types and how they surface to the user
//! - Request validation helpers
//! - State machine error types

pub mod config;
pub mod error;
pub mod state;
pub mod validation;

pub use config::Config;
pub use error::{Error, Result, Surface};
pub use state::StateError;
pub use validation::validate_request;
