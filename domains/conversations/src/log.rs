//! Append-only conversation log

use std::collections::HashSet;

use serde::Serialize;
use uuid::Uuid;

use medai_common::{Error, Result};

use crate::domain::entities::{Message, MessageRole};

/// Ordered message history of one chat session.
///
/// Always starts with the assistant greeting. Messages are only ever added
/// at the end; `clear` starts over with a fresh greeting.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationLog {
    messages: Vec<Message>,
    #[serde(skip)]
    ids: HashSet<Uuid>,
}

impl Default for ConversationLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationLog {
    /// A log holding only the greeting
    pub fn new() -> Self {
        let greeting = Message::greeting();
        let ids = HashSet::from([greeting.id]);
        Self {
            messages: vec![greeting],
            ids,
        }
    }

    /// Add a message at the end.
    ///
    /// Rejects blank content and an id already present in the log.
    pub fn append(&mut self, message: Message) -> Result<()> {
        Message::validate_content(&message.content)?;

        if !self.ids.insert(message.id) {
            return Err(Error::Validation(format!(
                "Message {} is already in the conversation",
                message.id
            )));
        }

        tracing::debug!(
            message_id = %message.id,
            role = %message.role,
            position = self.messages.len(),
            "Message appended"
        );
        self.messages.push(message);
        Ok(())
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always false; a log keeps at least its greeting
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// The trailing user message, if the assistant has not answered it
    pub fn unanswered(&self) -> Option<&Message> {
        self.last().filter(|m| m.role == MessageRole::User)
    }

    /// Discard all history and re-seed the greeting
    pub fn clear(&mut self) {
        tracing::debug!(discarded = self.messages.len(), "Conversation cleared");
        *self = Self::new();
    }

    /// Serialize the messages for rendering
    pub fn transcript_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.messages)?)
    }
}
