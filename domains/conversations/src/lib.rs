//! Conversations domain: chat log, simulated assistant replies

pub mod chat;
pub mod domain;
pub mod log;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{Message, MessageRole};
pub use domain::state::{
    ConversationEvent, ConversationState, ConversationStateMachine, StateError,
};

pub use chat::{ChatSession, CHAT_REPLY_ACTION};
pub use log::ConversationLog;
