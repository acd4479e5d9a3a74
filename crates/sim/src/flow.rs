//! State machine for form-submission flows
//!
//! Submission states: Idle → Submitting → {Confirmed | Failed}
//! - Submitting resolves with the underlying action; the outcome is read
//!   from `ActionStatus` rather than sent as an event
//! - Confirmed/Failed → Idle on reset ("book another", dismiss banner)
//! - Confirmed/Failed → Submitting on a new submit

use std::sync::Arc;

pub use medai_common::StateError;
use medai_common::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::{ActionFailure, ActionStatus, Completion, Responder, SimulatedAction};

/// Submission flow states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Confirmed,
    Failed,
}

impl SubmissionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Failed)
    }

    /// Whether the submit trigger should be enabled
    pub fn can_submit(&self) -> bool {
        SubmissionStateMachine::can_transition(*self, SubmissionEvent::Submit)
    }
}

impl From<ActionStatus> for SubmissionState {
    fn from(status: ActionStatus) -> Self {
        match status {
            ActionStatus::Idle => Self::Idle,
            ActionStatus::Pending => Self::Submitting,
            ActionStatus::Success => Self::Confirmed,
            ActionStatus::Failure => Self::Failed,
        }
    }
}

impl std::fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Submitting => write!(f, "submitting"),
            Self::Confirmed => write!(f, "confirmed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Events that trigger submission state transitions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SubmissionEvent {
    Submit,
    Reset,
}

impl std::fmt::Display for SubmissionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Submit => write!(f, "submit"),
            Self::Reset => write!(f, "reset"),
        }
    }
}

/// Submission state machine
pub struct SubmissionStateMachine;

impl SubmissionStateMachine {
    /// Attempt a state transition
    pub fn transition(
        current: SubmissionState,
        event: SubmissionEvent,
    ) -> std::result::Result<SubmissionState, StateError> {
        let next = match (&current, &event) {
            (SubmissionState::Submitting, SubmissionEvent::Submit) => {
                return Err(StateError::GuardFailed(
                    "a submission is already in progress".to_string(),
                ));
            }
            (_, SubmissionEvent::Submit) => SubmissionState::Submitting,
            (SubmissionState::Confirmed | SubmissionState::Failed, SubmissionEvent::Reset) => {
                SubmissionState::Idle
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

    pub fn can_transition(current: SubmissionState, event: SubmissionEvent) -> bool {
        Self::transition(current, event).is_ok()
    }
}

/// A form whose submission is one simulated action.
///
/// Callers validate the request before `submit`; the flow only enforces the
/// submission state machine.
#[derive(Debug)]
pub struct SubmissionFlow<I, O> {
    action: SimulatedAction<I, O>,
}

impl<I, O> SubmissionFlow<I, O>
where
    I: Send + 'static,
    O: Clone + Send + 'static,
{
    pub fn new(name: impl Into<String>, responder: Arc<dyn Responder<I, O>>) -> Self {
        Self {
            action: SimulatedAction::new(name, responder),
        }
    }

    pub fn name(&self) -> &str {
        self.action.name()
    }

    pub fn state(&self) -> SubmissionState {
        self.action.status().into()
    }

    /// Submit a validated request; `Conflict` while a submission is in flight
    pub fn submit(&self, request: I) -> Result<Completion<O>> {
        SubmissionStateMachine::transition(self.state(), SubmissionEvent::Submit)
            .map_err(|e| Error::Conflict(e.to_string()))?;
        Ok(self.action.invoke(request)?)
    }

    /// The confirmed outcome, once there is one
    pub fn outcome(&self) -> Option<O> {
        self.action.snapshot().ok().and_then(|result| result.value)
    }

    /// Why the last submission failed, if it did
    pub fn last_failure(&self) -> Option<ActionFailure> {
        self.action.snapshot().ok().and_then(|result| result.error)
    }

    /// Clear a confirmed or failed submission. No-op when idle.
    pub fn reset(&self) -> Result<()> {
        let state = self.state();
        if state == SubmissionState::Idle {
            return Ok(());
        }
        SubmissionStateMachine::transition(state, SubmissionEvent::Reset)
            .map_err(|e| Error::Conflict(e.to_string()))?;
        Ok(self.action.reset()?)
    }

    /// Abandon an in-flight submission
    pub fn cancel(&self) -> Result<bool> {
        Ok(self.action.cancel()?)
    }
}
