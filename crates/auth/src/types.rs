//! Session types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The mock identity shown in the dashboard header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
}

impl SessionUser {
    /// Build a user from an email alone; the username is the local part
    pub fn from_email(email: &str) -> Self {
        let username = email
            .split_once('@')
            .map(|(local, _)| local)
            .filter(|local| !local.is_empty())
            .unwrap_or(email);

        Self {
            username: username.to_string(),
            email: email.to_string(),
            phone: None,
        }
    }
}

/// A logged-in session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub user: SessionUser,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user: SessionUser) -> Self {
        Self {
            id: Uuid::new_v4(),
            user,
            created_at: Utc::now(),
        }
    }
}
