//! Single-flight simulated action
//!
//! Each invocation spawns one task that awaits the responder and then records
//! the outcome under the action's lock. An epoch counter, bumped on every
//! invocation and cancellation, lets a late task recognize that its outcome
//! was discarded.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::oneshot;
use tokio::task::AbortHandle;

use crate::result::{ActionEvent, ActionResult, ActionStateMachine, ActionStatus};
use crate::{ActionError, Responder};

struct Slot<O> {
    result: ActionResult<O>,
    epoch: u64,
    task: Option<AbortHandle>,
}

/// A latency-bearing operation with at most one invocation in flight.
///
/// Must be invoked from within a tokio runtime.
pub struct SimulatedAction<I, O> {
    name: String,
    responder: Arc<dyn Responder<I, O>>,
    slot: Arc<Mutex<Slot<O>>>,
}

/// Handle to one invocation; resolves to its terminal result
#[derive(Debug)]
pub struct Completion<O> {
    action: String,
    rx: oneshot::Receiver<ActionResult<O>>,
}

impl<O> Completion<O> {
    /// Wait for the invocation to resolve.
    ///
    /// Returns `ActionError::Cancelled` if the invocation was discarded.
    pub async fn wait(self) -> Result<ActionResult<O>, ActionError> {
        let Completion { action, rx } = self;
        rx.await.map_err(|_| ActionError::Cancelled { action })
    }
}

impl<I, O> SimulatedAction<I, O>
where
    I: Send + 'static,
    O: Clone + Send + 'static,
{
    pub fn new(name: impl Into<String>, responder: Arc<dyn Responder<I, O>>) -> Self {
        Self {
            name: name.into(),
            responder,
            slot: Arc::new(Mutex::new(Slot {
                result: ActionResult::idle(),
                epoch: 0,
                task: None,
            })),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current status; `Idle` if the state lock is poisoned
    pub fn status(&self) -> ActionStatus {
        self.lock()
            .map(|slot| slot.result.status)
            .unwrap_or_default()
    }

    pub fn is_pending(&self) -> bool {
        self.status() == ActionStatus::Pending
    }

    /// Copy of the current result
    pub fn snapshot(&self) -> Result<ActionResult<O>, ActionError> {
        Ok(self.lock()?.result.clone())
    }

    /// Start an invocation. The result is `Pending` when this returns.
    pub fn invoke(&self, input: I) -> Result<Completion<O>, ActionError> {
        self.invoke_with(input, |_| {})
    }

    /// Start an invocation and run `on_complete` once it resolves.
    ///
    /// `on_complete` runs under the action's lock, so it must not call back
    /// into this action. It never runs for a cancelled invocation.
    pub fn invoke_with<F>(&self, input: I, on_complete: F) -> Result<Completion<O>, ActionError>
    where
        F: FnOnce(&ActionResult<O>) + Send + 'static,
    {
        self.invoke_guarded(input, || Ok::<(), ActionError>(()), on_complete)
    }

    /// Start an invocation, running `on_start` once the single-flight check
    /// has passed and before the result turns `Pending`.
    ///
    /// If `on_start` fails the invocation is not started and the status is
    /// unchanged. Both callbacks run under the action's lock, so anything
    /// they lock must always be taken after this action's lock.
    pub fn invoke_guarded<S, F, E>(
        &self,
        input: I,
        on_start: S,
        on_complete: F,
    ) -> Result<Completion<O>, E>
    where
        S: FnOnce() -> Result<(), E>,
        F: FnOnce(&ActionResult<O>) + Send + 'static,
        E: From<ActionError>,
    {
        let mut slot = self.lock()?;

        ActionStateMachine::transition(slot.result.status, ActionEvent::Invoke).map_err(|_| {
            tracing::debug!(action = %self.name, "Rejecting invocation while pending");
            ActionError::InFlight {
                action: self.name.clone(),
            }
        })?;

        on_start()?;

        slot.epoch = slot.epoch.wrapping_add(1);
        slot.result = ActionResult::pending();
        let epoch = slot.epoch;

        let (tx, rx) = oneshot::channel();
        let responder = Arc::clone(&self.responder);
        let shared = Arc::clone(&self.slot);
        let name = self.name.clone();

        tracing::debug!(action = %name, epoch, "Simulated action invoked");

        let handle = tokio::spawn(async move {
            let outcome = responder.respond(input).await;

            let resolved = {
                let Ok(mut slot) = shared.lock() else {
                    tracing::error!(action = %name, "Action state lock poisoned");
                    return;
                };
                if slot.epoch != epoch {
                    tracing::debug!(action = %name, epoch, "Discarding superseded outcome");
                    return;
                }

                let (event, result) = match outcome {
                    Ok(value) => (ActionEvent::Resolve, ActionResult::success(value)),
                    Err(failure) => (ActionEvent::Reject, ActionResult::failure(failure)),
                };
                if let Err(e) = ActionStateMachine::transition(slot.result.status, event) {
                    tracing::error!(action = %name, error = %e, "Dropping outcome");
                    return;
                }

                slot.result = result;
                slot.task = None;
                on_complete(&slot.result);
                slot.result.clone()
            };

            match &resolved.error {
                None => tracing::info!(action = %name, "Simulated action succeeded"),
                Some(failure) => {
                    tracing::warn!(action = %name, error = %failure, "Simulated action failed")
                }
            }

            // Receiver may have been dropped by a caller that only polls status
            let _ = tx.send(resolved);
        });

        slot.task = Some(handle.abort_handle());

        Ok(Completion {
            action: self.name.clone(),
            rx,
        })
    }

    /// Invoke and wait for the terminal result
    pub async fn run(&self, input: I) -> Result<ActionResult<O>, ActionError> {
        self.invoke(input)?.wait().await
    }

    /// Discard a pending invocation without running its completion callback.
    ///
    /// Returns `false` if nothing was pending.
    pub fn cancel(&self) -> Result<bool, ActionError> {
        let mut slot = self.lock()?;
        if ActionStateMachine::transition(slot.result.status, ActionEvent::Cancel).is_err() {
            return Ok(false);
        }

        slot.epoch = slot.epoch.wrapping_add(1);
        slot.result = ActionResult::idle();
        if let Some(task) = slot.task.take() {
            task.abort();
        }

        tracing::info!(action = %self.name, "Pending invocation cancelled");
        Ok(true)
    }

    /// Return a terminal result to `Idle`. No-op when already idle.
    pub fn reset(&self) -> Result<(), ActionError> {
        let mut slot = self.lock()?;
        if slot.result.status == ActionStatus::Idle {
            return Ok(());
        }

        ActionStateMachine::transition(slot.result.status, ActionEvent::Reset).map_err(|_| {
            ActionError::InvalidState {
                action: self.name.clone(),
                event: ActionEvent::Reset.to_string(),
                status: slot.result.status,
            }
        })?;

        slot.result = ActionResult::idle();
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Slot<O>>, ActionError> {
        self.slot.lock().map_err(|_| ActionError::Poisoned {
            action: self.name.clone(),
        })
    }
}

impl<I, O> Drop for SimulatedAction<I, O> {
    fn drop(&mut self) {
        // The owner is gone; nothing may observe a late outcome
        if let Ok(mut slot) = self.slot.lock() {
            slot.epoch = slot.epoch.wrapping_add(1);
            if let Some(task) = slot.task.take() {
                task.abort();
            }
        }
    }
}

impl<I, O> std::fmt::Debug for SimulatedAction<I, O> {
    #[mutants::skip] // Diagnostic output only
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = self.slot.lock().map(|slot| slot.result.status).ok();
        f.debug_struct("SimulatedAction")
            .field("name", &self.name)
            .field("status", &status)
            .finish()
    }
}
