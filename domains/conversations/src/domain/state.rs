//! State machine for a chat session
//!
//! Conversation states: Ready → AwaitingReply → Ready
//! - At most one reply is awaited at a time

pub use medai_common::StateError;
use medai_sim::ActionStatus;
use serde::{Deserialize, Serialize};

/// Chat session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    #[default]
    Ready,
    AwaitingReply,
}

impl ConversationState {
    /// Get all valid next states from current state
    pub fn valid_transitions(&self) -> &'static [ConversationState] {
        match self {
            Self::Ready => &[Self::AwaitingReply],
            Self::AwaitingReply => &[Self::Ready],
        }
    }

    /// Whether the send trigger should be enabled
    pub fn can_send(&self) -> bool {
        ConversationStateMachine::can_transition(*self, ConversationEvent::Send)
    }
}

impl From<ActionStatus> for ConversationState {
    fn from(status: ActionStatus) -> Self {
        match status {
            ActionStatus::Pending => Self::AwaitingReply,
            ActionStatus::Idle | ActionStatus::Success | ActionStatus::Failure => Self::Ready,
        }
    }
}

impl std::fmt::Display for ConversationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ready => write!(f, "ready"),
            Self::AwaitingReply => write!(f, "awaiting_reply"),
        }
    }
}

/// Events that trigger conversation state transitions.
///
/// The return to `Ready` is not an event here: it follows the reply action
/// resolving or being cancelled, see `From<ActionStatus>`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConversationEvent {
    /// User sent a message (or retried the last one)
    Send,
}

impl std::fmt::Display for ConversationEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Send => write!(f, "send"),
        }
    }
}

/// Conversation state machine
pub struct ConversationStateMachine;

impl ConversationStateMachine {
    /// Attempt a state transition
    pub fn transition(
        current: ConversationState,
        event: ConversationEvent,
    ) -> Result<ConversationState, StateError> {
        match (current, event) {
            (ConversationState::Ready, ConversationEvent::Send) => {
                Ok(ConversationState::AwaitingReply)
            }
            (ConversationState::AwaitingReply, ConversationEvent::Send) => Err(
                StateError::GuardFailed("a reply is already being generated".to_string()),
            ),
        }
    }

    pub fn can_transition(current: ConversationState, event: ConversationEvent) -> bool {
        Self::transition(current, event).is_ok()
    }
}
