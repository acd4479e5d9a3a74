//! State machine for report upload and analysis
//!
//! Upload states: Empty → Selected → Analyzing → {Analyzed | Failed}
//! - Selecting another file from any non-empty state returns to Selected
//! - Remove returns to Empty from any non-empty state
//! - Failed → Analyzing on retry
//! - Analyzing resolves to Analyzed or Failed with the analysis action;
//!   those moves are read through `UploadState::derive`, not sent as events

pub use medai_common::StateError;
use medai_sim::ActionStatus;
use serde::{Deserialize, Serialize};

/// Report upload states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UploadState {
    #[default]
    Empty,
    Selected,
    Analyzing,
    Analyzed,
    Failed,
}

impl UploadState {
    /// Derive the state from file presence and the analysis action's status
    pub fn derive(has_file: bool, analysis: ActionStatus) -> Self {
        if !has_file {
            return Self::Empty;
        }
        match analysis {
            ActionStatus::Idle => Self::Selected,
            ActionStatus::Pending => Self::Analyzing,
            ActionStatus::Success => Self::Analyzed,
            ActionStatus::Failure => Self::Failed,
        }
    }

    /// Get all valid next states from current state
    pub fn valid_transitions(&self) -> &'static [UploadState] {
        match self {
            Self::Empty => &[Self::Selected],
            Self::Selected => &[Self::Selected, Self::Analyzing, Self::Empty],
            Self::Analyzing => &[Self::Analyzed, Self::Failed, Self::Selected, Self::Empty],
            Self::Analyzed => &[Self::Selected, Self::Empty],
            Self::Failed => &[Self::Analyzing, Self::Selected, Self::Empty],
        }
    }
}

impl std::fmt::Display for UploadState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::Selected => write!(f, "selected"),
            Self::Analyzing => write!(f, "analyzing"),
            Self::Analyzed => write!(f, "analyzed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Events that trigger upload state transitions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UploadEvent {
    /// A file was chosen (replacing any previous one)
    Select,
    /// The file was removed
    Remove,
    /// Analysis requested
    Analyze,
}

impl std::fmt::Display for UploadEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Select => write!(f, "select"),
            Self::Remove => write!(f, "remove"),
            Self::Analyze => write!(f, "analyze"),
        }
    }
}

/// Upload state machine
pub struct UploadStateMachine;

impl UploadStateMachine {
    /// Attempt a state transition
    pub fn transition(current: UploadState, event: UploadEvent) -> Result<UploadState, StateError> {
        let next = match (&current, &event) {
            (_, UploadEvent::Select) => UploadState::Selected,
            (UploadState::Empty, UploadEvent::Remove) => {
                return Err(StateError::GuardFailed("no file is selected".to_string()));
            }
            (_, UploadEvent::Remove) => UploadState::Empty,
            (UploadState::Analyzing, UploadEvent::Analyze) => {
                return Err(StateError::GuardFailed(
                    "the report is already being analyzed".to_string(),
                ));
            }
            (UploadState::Selected | UploadState::Failed, UploadEvent::Analyze) => {
                UploadState::Analyzing
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

    pub fn can_transition(current: UploadState, event: UploadEvent) -> bool {
        Self::transition(current, event).is_ok()
    }
}
