//! Domain entities for the Conversations domain

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use medai_common::{Error, Result};
use medai_fixtures::{CannedResponse, FixtureStore};

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// Message entity; immutable once created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a new user message
    pub fn new_user(content: impl Into<String>) -> Result<Self> {
        Self::new(MessageRole::User, content.into())
    }

    /// Create a new assistant message
    pub fn new_assistant(content: impl Into<String>) -> Result<Self> {
        Self::new(MessageRole::Assistant, content.into())
    }

    /// The assistant greeting every conversation starts with
    pub fn greeting() -> Self {
        Message {
            id: Uuid::new_v4(),
            role: MessageRole::Assistant,
            content: FixtureStore::global()
                .canned(CannedResponse::Greeting)
                .to_string(),
            timestamp: Utc::now(),
        }
    }

    fn new(role: MessageRole, content: String) -> Result<Self> {
        Self::validate_content(&content)?;

        Ok(Message {
            id: Uuid::new_v4(),
            role,
            content,
            timestamp: Utc::now(),
        })
    }

    /// Validate message content (non-blank)
    pub(crate) fn validate_content(content: &str) -> Result<()> {
        if content.trim().is_empty() {
            return Err(Error::Validation(
                "Message content cannot be empty or whitespace-only".to_string(),
            ));
        }
        Ok(())
    }

    pub fn is_user(&self) -> bool {
        self.role == MessageRole::User
    }
}
