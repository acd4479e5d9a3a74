//! Properties every flow must hold regardless of timing or injected failures

use std::sync::Arc;
use std::time::Duration;

use medai_common::{Config, Error};
use medai_conversations::{ChatSession, ConversationLog, Message, MessageRole};
use medai_emergency::EmergencyRequest;
use medai_fixtures::FixtureStore;
use medai_sim::{
    ActionError, ActionFailure, ActionStatus, DelayedResponder, ManualResponder, SimulatedAction,
};
use tokio_test::{assert_err, assert_ok};

mod common;

fn emergency(age: u32) -> EmergencyRequest {
    EmergencyRequest {
        patient_name: "Sam".to_string(),
        age,
        description: "Severe shortness of breath".to_string(),
    }
}

#[test]
fn test_new_log_holds_exactly_the_greeting() {
    let log = ConversationLog::new();

    assert_eq!(log.len(), 1);
    assert_eq!(log.messages()[0].role, MessageRole::Assistant);
}

#[test]
fn test_log_append_only_preserves_prefix() {
    let mut log = ConversationLog::new();
    let mut seen: Vec<Message> = log.messages().to_vec();

    for i in 0..5 {
        log.append(Message::new_user(format!("question {i}")).unwrap())
            .unwrap();
        log.append(Message::new_assistant(format!("answer {i}")).unwrap())
            .unwrap();

        assert_eq!(&log.messages()[..seen.len()], seen.as_slice());
        seen = log.messages().to_vec();
    }
    assert_eq!(log.len(), 11);
}

#[test_log::test(tokio::test)]
async fn test_second_send_while_pending_is_rejected_without_duplicate_reply() {
    let responder: Arc<ManualResponder<String>> = Arc::new(ManualResponder::new());
    let chat = ChatSession::new(responder.clone());

    let first = chat.respond_to("first").unwrap();
    responder.wait_for_requests(1).await;

    assert!(matches!(chat.respond_to("second"), Err(Error::Conflict(_))));
    assert!(matches!(chat.retry(), Err(Error::Conflict(_))));

    assert!(responder.resolve("only reply".to_string()));
    first.wait().await.unwrap();

    let roles: Vec<MessageRole> = chat.messages().unwrap().iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![MessageRole::Assistant, MessageRole::User, MessageRole::Assistant]
    );
    assert_eq!(responder.waiting(), 0);
}

#[test_log::test(tokio::test)]
async fn test_status_never_skips_pending() {
    let responder: Arc<ManualResponder<u32>> = Arc::new(ManualResponder::new());
    let action: SimulatedAction<(), u32> = SimulatedAction::new("probe", responder.clone());
    assert_eq!(action.status(), ActionStatus::Idle);

    let completion = action.invoke(()).unwrap();
    assert_eq!(action.status(), ActionStatus::Pending);
    responder.wait_for_requests(1).await;
    assert_eq!(action.status(), ActionStatus::Pending);

    responder.resolve(7);
    let result = completion.wait().await.unwrap();
    assert_eq!(result.status, ActionStatus::Success);
    assert_eq!(action.status(), ActionStatus::Success);

    assert!(action.invoke(()).is_ok());
    assert_eq!(action.status(), ActionStatus::Pending);
}

#[test_log::test(tokio::test)]
async fn test_emergency_age_bounds() {
    let portal = common::portal();
    let dashboard = common::dashboard(&portal);
    let flow = dashboard.emergency().unwrap();

    for age in [0, 121, 500] {
        assert!(
            matches!(flow.submit(emergency(age)), Err(Error::Validation(_))),
            "age {age} must be rejected"
        );
    }
    assert_ok!(flow.submit(emergency(1)));
    assert!(assert_ok!(flow.cancel()));
    assert_ok!(flow.submit(emergency(120)));
}

#[test]
fn test_fixture_reads_are_stable() {
    let store = FixtureStore::global();

    let first: Vec<String> = store.doctors().iter().map(|d| d.id.clone()).collect();
    let second: Vec<String> = store.doctors().iter().map(|d| d.id.clone()).collect();
    assert_eq!(first, second);

    assert!(std::ptr::eq(
        store.report_analysis(),
        FixtureStore::global().report_analysis()
    ));
    assert_eq!(store.time_slots(), FixtureStore::global().time_slots());
    assert_eq!(store.lab_tests(), FixtureStore::global().lab_tests());
}

#[test_log::test(tokio::test(start_paused = true))]
async fn test_cancelled_reply_never_lands() {
    let portal = common::portal();
    let dashboard = common::dashboard(&portal);
    let chat = dashboard.chat().unwrap();

    let completion = chat.respond_to("hello?").unwrap();
    assert!(chat.cancel().unwrap());

    assert_err!(completion.wait().await);
    tokio::time::sleep(Duration::from_secs(5)).await;

    let messages = chat.messages().unwrap();
    assert_eq!(messages.len(), 2);
    assert!(messages.last().unwrap().is_user());
}

#[test_log::test(tokio::test(start_paused = true))]
async fn test_injected_failure_always_fails_every_flow() {
    let portal = common::portal_with(Config {
        failure_probability: 1.0,
        ..Config::default()
    });
    let dashboard = common::dashboard(&portal);

    let result = dashboard
        .emergency()
        .unwrap()
        .submit(emergency(40))
        .unwrap()
        .wait()
        .await
        .unwrap();
    assert_eq!(result.status, ActionStatus::Failure);
    assert!(result.value.is_none());
    assert!(matches!(result.error, Some(ActionFailure::Injected(_))));

    let chat = dashboard.chat().unwrap();
    chat.respond_to("anyone?").unwrap().wait().await.unwrap();
    assert_eq!(chat.messages().unwrap().len(), 2);
}

#[test_log::test(tokio::test(start_paused = true))]
async fn test_timeout_resolves_to_failure() {
    let responder: DelayedResponder<(), u8> = DelayedResponder::fixed(Duration::from_secs(10), 1)
        .with_timeout(Some(Duration::from_millis(100)));
    let action: SimulatedAction<(), u8> = SimulatedAction::new("slow", Arc::new(responder));

    let result = action.run(()).await.unwrap();

    assert_eq!(result.status, ActionStatus::Failure);
    assert_eq!(
        result.error,
        Some(ActionFailure::TimedOut { after_ms: 100 })
    );
}

#[test_log::test(tokio::test)]
async fn test_dropping_action_cancels_completion() {
    let responder: Arc<ManualResponder<u8>> = Arc::new(ManualResponder::new());
    let action: SimulatedAction<(), u8> = SimulatedAction::new("dropped", responder.clone());
    let completion = action.invoke(()).unwrap();

    drop(action);

    assert!(matches!(
        completion.wait().await,
        Err(ActionError::Cancelled { .. })
    ));
}

#[test]
fn test_no_session_means_no_dashboard() {
    let portal = common::portal();

    assert!(matches!(portal.dashboard(), Err(Error::SessionAbsent)));
    common::login(&portal);
    assert_ok!(portal.dashboard());
    portal.logout().unwrap();
    assert!(matches!(portal.dashboard(), Err(Error::SessionAbsent)));
}
