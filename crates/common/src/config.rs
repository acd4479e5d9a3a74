//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config. Every value has a default
//! matching the latencies the portal simulates.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Simulated latencies, in milliseconds
    pub chat_reply_delay_ms: u64,
    pub appointment_delay_ms: u64,
    pub emergency_delay_ms: u64,
    pub report_analysis_delay_ms: u64,
    pub lab_booking_delay_ms: u64,

    /// Chance in [0, 1] that a simulated action resolves to failure
    pub failure_probability: f64,

    /// Upper bound on any simulated action; unset means no timeout
    pub action_timeout_ms: Option<u64>,

    /// Runtime configuration
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chat_reply_delay_ms: 1200,
            appointment_delay_ms: 500,
            emergency_delay_ms: 1500,
            report_analysis_delay_ms: 2000,
            lab_booking_delay_ms: 500,
            failure_probability: 0.0,
            action_timeout_ms: None,
            rust_log: "medai=debug".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let defaults = Self::default();

        let failure_probability: f64 =
            parse_var("FAILURE_PROBABILITY", defaults.failure_probability)?;
        if !(0.0..=1.0).contains(&failure_probability) {
            return Err(anyhow::anyhow!(
                "FAILURE_PROBABILITY must be between 0 and 1, got {}",
                failure_probability
            ));
        }

        let action_timeout_ms = match env::var("ACTION_TIMEOUT_MS") {
            Ok(raw) => Some(raw.parse().map_err(|e| {
                anyhow::anyhow!("ACTION_TIMEOUT_MS is not a valid integer: {}", e)
            })?),
            Err(_) => None,
        };

        let config = Self {
            chat_reply_delay_ms: parse_var("CHAT_REPLY_DELAY_MS", defaults.chat_reply_delay_ms)?,
            appointment_delay_ms: parse_var(
                "APPOINTMENT_DELAY_MS",
                defaults.appointment_delay_ms,
            )?,
            emergency_delay_ms: parse_var("EMERGENCY_DELAY_MS", defaults.emergency_delay_ms)?,
            report_analysis_delay_ms: parse_var(
                "REPORT_ANALYSIS_DELAY_MS",
                defaults.report_analysis_delay_ms,
            )?,
            lab_booking_delay_ms: parse_var("LAB_BOOKING_DELAY_MS", defaults.lab_booking_delay_ms)?,
            failure_probability,
            action_timeout_ms,
            rust_log: env::var("RUST_LOG").unwrap_or(defaults.rust_log),
        };

        tracing::debug!(?config, "Simulation configuration loaded");

        Ok(config)
    }

    pub fn chat_reply_delay(&self) -> Duration {
        Duration::from_millis(self.chat_reply_delay_ms)
    }

    pub fn appointment_delay(&self) -> Duration {
        Duration::from_millis(self.appointment_delay_ms)
    }

    pub fn emergency_delay(&self) -> Duration {
        Duration::from_millis(self.emergency_delay_ms)
    }

    pub fn report_analysis_delay(&self) -> Duration {
        Duration::from_millis(self.report_analysis_delay_ms)
    }

    pub fn lab_booking_delay(&self) -> Duration {
        Duration::from_millis(self.lab_booking_delay_ms)
    }

    pub fn action_timeout(&self) -> Option<Duration> {
        self.action_timeout_ms.map(Duration::from_millis)
    }
}

/// Read an env var, falling back to `default` when unset.
///
/// A value that is set but unparsable is an error rather than a silent default.
fn parse_var<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{} has an invalid value {:?}: {}", key, raw, e)),
        Err(_) => Ok(default),
    }
}
