//! Emergency request flow

use std::sync::Arc;

use medai_common::{validate_request, Config, Result};
use medai_fixtures::FixtureStore;
use medai_sim::{
    ActionFailure, Completion, DelayedResponder, Responder, SubmissionFlow, SubmissionState,
};

use crate::domain::entities::{EmergencyDispatch, EmergencyRequest};

/// Action name used in logs and errors
pub const EMERGENCY_ACTION: &str = "emergency_dispatch";

fn dispatch_ambulance(request: EmergencyRequest) -> std::result::Result<EmergencyDispatch, ActionFailure> {
    Ok(EmergencyDispatch::new(
        request,
        FixtureStore::global().mock_location(),
    ))
}

/// Ambulance request form
#[derive(Debug)]
pub struct EmergencyFlow {
    flow: SubmissionFlow<EmergencyRequest, EmergencyDispatch>,
}

impl EmergencyFlow {
    pub fn new(responder: Arc<dyn Responder<EmergencyRequest, EmergencyDispatch>>) -> Self {
        Self {
            flow: SubmissionFlow::new(EMERGENCY_ACTION, responder),
        }
    }

    /// Flow dispatching from fixtures after the configured delay
    pub fn simulated(config: &Config) -> Self {
        let responder = DelayedResponder::new(config.emergency_delay(), dispatch_ambulance).with_config(config);
        Self::new(Arc::new(responder))
    }

    /// Location shown before submission, standing in for geolocation
    pub fn detected_location(&self) -> &'static str {
        FixtureStore::global().mock_location()
    }

    pub fn state(&self) -> SubmissionState {
        self.flow.state()
    }

    pub fn submit(&self, request: EmergencyRequest) -> Result<Completion<EmergencyDispatch>> {
        validate_request(&request)?;

        // Patient details stay out of the logs
        tracing::warn!(age = request.age, "Emergency request submitted");

        self.flow.submit(request)
    }

    pub fn dispatch(&self) -> Option<EmergencyDispatch> {
        self.flow.outcome()
    }

    pub fn last_failure(&self) -> Option<ActionFailure> {
        self.flow.last_failure()
    }

    /// Dismiss a confirmation or failure banner
    pub fn dismiss(&self) -> Result<()> {
        self.flow.reset()
    }

    pub fn cancel(&self) -> Result<bool> {
        self.flow.cancel()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medai_common::Error;
    use std::time::Duration;

    fn request(age: u32) -> EmergencyRequest {
        EmergencyRequest {
            patient_name: "Sam Lee".to_string(),
            age,
            description: "Unconscious after a fall".to_string(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispatch_after_delay() {
        let flow = EmergencyFlow::simulated(&Config::default());
        let start = tokio::time::Instant::now();

        let completion = flow.submit(request(64)).unwrap();
        assert_eq!(flow.state(), SubmissionState::Submitting);
        assert!(flow.dispatch().is_none());

        completion.wait().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(1500));

        let dispatch = flow.dispatch().unwrap();
        assert_eq!(dispatch.location, "123 Main St, City (Mock)");
        assert_eq!(dispatch.location, flow.detected_location());
        assert_eq!(flow.state(), SubmissionState::Confirmed);
    }

    #[tokio::test]
    async fn test_age_out_of_range_never_submits() {
        let flow = EmergencyFlow::simulated(&Config::default());

        for age in [0, 121] {
            assert!(matches!(flow.submit(request(age)), Err(Error::Validation(_))));
        }
        assert_eq!(flow.state(), SubmissionState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_age_bounds_accepted() {
        let flow = EmergencyFlow::simulated(&Config::default());

        for age in [1, 120] {
            flow.submit(request(age)).unwrap().wait().await.unwrap();
            assert_eq!(flow.state(), SubmissionState::Confirmed);
            flow.dismiss().unwrap();
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_fails_submission() {
        let config = Config {
            action_timeout_ms: Some(1000),
            ..Config::default()
        };
        let flow = EmergencyFlow::simulated(&config);

        flow.submit(request(30)).unwrap().wait().await.unwrap();

        assert_eq!(flow.state(), SubmissionState::Failed);
        assert_eq!(
            flow.last_failure(),
            Some(ActionFailure::TimedOut { after_ms: 1000 })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_discards_dispatch() {
        let flow = EmergencyFlow::simulated(&Config::default());
        let completion = flow.submit(request(30)).unwrap();

        assert!(flow.cancel().unwrap());
        assert!(completion.wait().await.is_err());
        assert!(flow.dispatch().is_none());
        assert_eq!(flow.state(), SubmissionState::Idle);
    }
}
