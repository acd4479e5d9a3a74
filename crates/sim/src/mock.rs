//! Deterministic responders for tests
//!
//! - `ImmediateResponder`: resolves without any latency, counts calls
//! - `ManualResponder`: resolves only when the test says so

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use tokio::sync::oneshot;

use crate::{ActionFailure, Responder};

type Produce<I, O> = Box<dyn Fn(I) -> Result<O, ActionFailure> + Send + Sync>;

/// Responder that resolves immediately
pub struct ImmediateResponder<I, O> {
    produce: Produce<I, O>,
    calls: AtomicUsize,
}

impl<I, O> ImmediateResponder<I, O> {
    pub fn new<F>(produce: F) -> Self
    where
        F: Fn(I) -> Result<O, ActionFailure> + Send + Sync + 'static,
    {
        Self {
            produce: Box::new(produce),
            calls: AtomicUsize::new(0),
        }
    }

    /// Always fail with `failure`
    pub fn failing(failure: ActionFailure) -> Self {
        Self::new(move |_| Err(failure.clone()))
    }

    /// Number of invocations seen so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl<I, O> Responder<I, O> for ImmediateResponder<I, O>
where
    I: Send + 'static,
    O: Send + 'static,
{
    async fn respond(&self, input: I) -> Result<O, ActionFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.produce)(input)
    }
}

/// Responder whose outcomes are supplied by the test, in request order
#[derive(Debug)]
pub struct ManualResponder<O> {
    waiting: Mutex<VecDeque<oneshot::Sender<Result<O, ActionFailure>>>>,
}

impl<O> Default for ManualResponder<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O> ManualResponder<O> {
    pub fn new() -> Self {
        Self {
            waiting: Mutex::new(VecDeque::new()),
        }
    }

    /// Number of requests waiting for an outcome
    pub fn waiting(&self) -> usize {
        self.waiting
            .lock()
            .expect("waiting lock poisoned: prior test panicked")
            .len()
    }

    /// Yield until at least `count` requests are waiting
    pub async fn wait_for_requests(&self, count: usize) {
        while self.waiting() < count {
            tokio::task::yield_now().await;
        }
    }

    /// Resolve the oldest waiting request with a value.
    ///
    /// Returns `false` if nothing was waiting or the requester is gone.
    pub fn resolve(&self, value: O) -> bool {
        self.complete(Ok(value))
    }

    /// Resolve the oldest waiting request with a failure
    pub fn fail(&self, failure: ActionFailure) -> bool {
        self.complete(Err(failure))
    }

    fn complete(&self, outcome: Result<O, ActionFailure>) -> bool {
        let sender = self
            .waiting
            .lock()
            .expect("waiting lock poisoned: prior test panicked")
            .pop_front();
        match sender {
            Some(tx) => tx.send(outcome).is_ok(),
            None => false,
        }
    }
}

#[async_trait::async_trait]
impl<I, O> Responder<I, O> for ManualResponder<O>
where
    I: Send + 'static,
    O: Send + 'static,
{
    async fn respond(&self, _input: I) -> Result<O, ActionFailure> {
        let (tx, rx) = oneshot::channel();
        self.waiting
            .lock()
            .map_err(|e| ActionFailure::Rejected(format!("waiting lock poisoned: {e}")))?
            .push_back(tx);
        rx.await
            .map_err(|_| ActionFailure::Rejected("manual responder dropped".to_string()))?
    }
}
