//! Action result and its status state machine
//!
//! Status states: Idle → Pending → {Success | Failure}
//! - A terminal status goes back to Pending only through a new invocation
//! - Pending goes back to Idle only through cancellation
//! - A terminal status may be reset to Idle

pub use medai_common::StateError;
use serde::{Deserialize, Serialize};

use crate::ActionFailure;

/// Status of a simulated action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    #[default]
    Idle,
    Pending,
    Success,
    Failure,
}

impl ActionStatus {
    /// Check if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Failure)
    }

    /// Get all valid next states from current state
    pub fn valid_transitions(&self) -> &'static [ActionStatus] {
        match self {
            Self::Idle => &[Self::Pending],
            Self::Pending => &[Self::Success, Self::Failure, Self::Idle],
            Self::Success => &[Self::Pending, Self::Idle],
            Self::Failure => &[Self::Pending, Self::Idle],
        }
    }
}

impl std::fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Pending => write!(f, "pending"),
            Self::Success => write!(f, "success"),
            Self::Failure => write!(f, "failure"),
        }
    }
}

/// Events that trigger action status transitions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionEvent {
    /// Caller starts a new invocation
    Invoke,
    /// Responder produced a value
    Resolve,
    /// Responder produced a failure
    Reject,
    /// Owner discarded the pending invocation
    Cancel,
    /// Caller acknowledged a terminal result
    Reset,
}

impl std::fmt::Display for ActionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invoke => write!(f, "invoke"),
            Self::Resolve => write!(f, "resolve"),
            Self::Reject => write!(f, "reject"),
            Self::Cancel => write!(f, "cancel"),
            Self::Reset => write!(f, "reset"),
        }
    }
}

/// Action status state machine
pub struct ActionStateMachine;

impl ActionStateMachine {
    /// Attempt a state transition
    pub fn transition(
        current: ActionStatus,
        event: ActionEvent,
    ) -> Result<ActionStatus, StateError> {
        let next = match (&current, &event) {
            (ActionStatus::Pending, ActionEvent::Invoke) => {
                return Err(StateError::GuardFailed(
                    "an invocation is already pending".to_string(),
                ));
            }
            (_, ActionEvent::Invoke) => ActionStatus::Pending,

            (ActionStatus::Pending, ActionEvent::Resolve) => ActionStatus::Success,
            (ActionStatus::Pending, ActionEvent::Reject) => ActionStatus::Failure,
            (ActionStatus::Pending, ActionEvent::Cancel) => ActionStatus::Idle,

            (ActionStatus::Success | ActionStatus::Failure, ActionEvent::Reset) => {
                ActionStatus::Idle
            }

            _ => {
                return Err(StateError::InvalidTransition {
                    from: current.to_string(),
                    event: event.to_string(),
                });
            }
        };

        Ok(next)
    }

    /// Check if a transition is valid without performing it
    pub fn can_transition(current: ActionStatus, event: ActionEvent) -> bool {
        Self::transition(current, event).is_ok()
    }
}

/// Observable outcome of a simulated action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResult<T> {
    pub status: ActionStatus,
    pub value: Option<T>,
    pub error: Option<ActionFailure>,
}

impl<T> Default for ActionResult<T> {
    fn default() -> Self {
        Self::idle()
    }
}

impl<T> ActionResult<T> {
    pub fn idle() -> Self {
        Self {
            status: ActionStatus::Idle,
            value: None,
            error: None,
        }
    }

    pub fn pending() -> Self {
        Self {
            status: ActionStatus::Pending,
            value: None,
            error: None,
        }
    }

    pub fn success(value: T) -> Self {
        Self {
            status: ActionStatus::Success,
            value: Some(value),
            error: None,
        }
    }

    pub fn failure(error: ActionFailure) -> Self {
        Self {
            status: ActionStatus::Failure,
            value: None,
            error: Some(error),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == ActionStatus::Pending
    }

    /// Convert a terminal result into a plain `Result`
    pub fn into_result(self) -> Result<T, ActionFailure> {
        match (self.value, self.error) {
            (Some(value), _) => Ok(value),
            (None, Some(error)) => Err(error),
            (None, None) => Err(ActionFailure::Rejected(format!(
                "result is {}, not terminal",
                self.status
            ))),
        }
    }
}
