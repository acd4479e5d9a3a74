//! Shared helpers for integration tests

#![allow(dead_code)]

use chrono::NaiveDate;

use medai_app::{Dashboard, Portal};
use medai_auth::{LoginRequest, SessionStore};
use medai_common::Config;

pub const TEST_EMAIL: &str = "integration.patient@example.com";

/// Portal with the production delays and no failure injection
pub fn portal() -> Portal {
    Portal::new(Config::default(), SessionStore::new())
}

/// Portal with a custom configuration
pub fn portal_with(config: Config) -> Portal {
    Portal::new(config, SessionStore::new())
}

pub fn login(portal: &Portal) {
    portal
        .login(LoginRequest {
            email: TEST_EMAIL.to_string(),
            password: "integration".to_string(),
        })
        .expect("login with a valid email must succeed");
}

/// Logged-in portal and its dashboard
pub fn dashboard(portal: &Portal) -> Dashboard {
    login(portal);
    portal
        .dashboard()
        .expect("dashboard must open once logged in")
}

/// Fixed day so tests never depend on the calendar
pub fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 1).expect("valid date")
}
