//! Delayed fixture responder
//!
//! The production simulation: waits a fixed delay, then either fails per the
//! configured policy or produces a value from fixtures.

use std::time::Duration;

use medai_common::Config;

use crate::{ActionFailure, FailurePolicy, Responder};

type Produce<I, O> = Box<dyn Fn(I) -> Result<O, ActionFailure> + Send + Sync>;

/// Responder that resolves after a fixed delay
pub struct DelayedResponder<I, O> {
    delay: Duration,
    failure: FailurePolicy,
    timeout: Option<Duration>,
    produce: Produce<I, O>,
}

impl<I, O> DelayedResponder<I, O> {
    pub fn new<F>(delay: Duration, produce: F) -> Self
    where
        F: Fn(I) -> Result<O, ActionFailure> + Send + Sync + 'static,
    {
        Self {
            delay,
            failure: FailurePolicy::Never,
            timeout: None,
            produce: Box::new(produce),
        }
    }

    /// Always resolve to a clone of `value`
    pub fn fixed(delay: Duration, value: O) -> Self
    where
        O: Clone + Send + Sync + 'static,
    {
        Self::new(delay, move |_| Ok(value.clone()))
    }

    pub fn with_failure_policy(mut self, failure: FailurePolicy) -> Self {
        self.failure = failure;
        self
    }

    /// Fail with `TimedOut` if the delay would exceed `timeout`
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Apply the configured failure probability and timeout
    pub fn with_config(self, config: &Config) -> Self {
        self.with_failure_policy(FailurePolicy::from_probability(config.failure_probability))
            .with_timeout(config.action_timeout())
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait::async_trait]
impl<I, O> Responder<I, O> for DelayedResponder<I, O>
where
    I: Send + 'static,
    O: Send + 'static,
{
    async fn respond(&self, input: I) -> Result<O, ActionFailure> {
        let latency = tokio::time::sleep(self.delay);
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, latency).await.map_err(|_| {
                ActionFailure::TimedOut {
                    after_ms: limit.as_millis() as u64,
                }
            })?,
            None => latency.await,
        }

        if self.failure.should_fail() {
            return Err(ActionFailure::Injected(
                "the service is temporarily unavailable".to_string(),
            ));
        }

        (self.produce)(input)
    }
}
