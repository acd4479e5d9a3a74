//! MedAI Simulated Async Actions
//!
//! Models latency-bearing operations without a backend while keeping the
//! contract a real network call would have:
//! - `SimulatedAction`: single-flight invocation with observable status
//! - `Responder`: pluggable source of outcomes (delayed fixture, test doubles)
//! - `FailurePolicy`: configurable failure injection
//! - `SubmissionFlow`: form submission over one action, with derived state

pub mod action;
pub mod delayed;
pub mod flow;
pub mod mock;
pub mod result;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use action::{Completion, SimulatedAction};
pub use delayed::DelayedResponder;
pub use flow::{SubmissionEvent, SubmissionFlow, SubmissionState, SubmissionStateMachine};
pub use mock::{ImmediateResponder, ManualResponder};
pub use result::{ActionEvent, ActionResult, ActionStateMachine, ActionStatus};

/// Why a simulated action resolved to failure
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionFailure {
    #[error("Service unavailable: {0}")]
    Injected(String),

    #[error("Timed out after {after_ms} ms")]
    TimedOut { after_ms: u64 },

    #[error("Request rejected: {0}")]
    Rejected(String),
}

/// Why an invocation could not be started or observed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("{action} is already in flight")]
    InFlight { action: String },

    #[error("{action} was cancelled before it resolved")]
    Cancelled { action: String },

    #[error("{action} cannot {event} while {status}")]
    InvalidState {
        action: String,
        event: String,
        status: ActionStatus,
    },

    #[error("{action} state lock poisoned")]
    Poisoned { action: String },
}

impl From<ActionFailure> for medai_common::Error {
    fn from(failure: ActionFailure) -> Self {
        medai_common::Error::ActionFailed(failure.to_string())
    }
}

impl From<ActionError> for medai_common::Error {
    fn from(error: ActionError) -> Self {
        match error {
            ActionError::InFlight { .. } | ActionError::InvalidState { .. } => {
                medai_common::Error::Conflict(error.to_string())
            }
            ActionError::Cancelled { .. } => medai_common::Error::ActionFailed(error.to_string()),
            ActionError::Poisoned { .. } => medai_common::Error::Internal(error.to_string()),
        }
    }
}

/// When a responder should fail instead of producing its fixture
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "p")]
pub enum FailurePolicy {
    #[default]
    Never,
    Always,
    /// Fail with the given chance, clamped to [0, 1]
    Probability(f64),
}

impl FailurePolicy {
    /// Build from a configured probability; 0 means never, 1 means always
    pub fn from_probability(p: f64) -> Self {
        if p <= 0.0 {
            Self::Never
        } else if p >= 1.0 {
            Self::Always
        } else {
            Self::Probability(p)
        }
    }

    pub fn should_fail(&self) -> bool {
        match self {
            Self::Never => false,
            Self::Always => true,
            Self::Probability(p) => rand::thread_rng().gen_bool(p.clamp(0.0, 1.0)),
        }
    }
}

/// Source of outcomes for a simulated action.
///
/// A real backend client would implement this in place of the fixtures.
#[async_trait::async_trait]
pub trait Responder<I, O>: Send + Sync {
    /// Produce the outcome for one invocation
    async fn respond(&self, input: I) -> Result<O, ActionFailure>;
}
