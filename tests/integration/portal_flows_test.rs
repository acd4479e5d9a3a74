//! End-to-end walkthroughs of the dashboard flows through the portal

use std::time::Duration;

use rust_decimal::Decimal;
use tokio::time::Instant;

use medai_appointments::AppointmentRequest;
use medai_auth::{LoginRequest, SignupRequest};
use medai_common::{Config, Error, Surface};
use medai_conversations::{ConversationState, MessageRole};
use medai_emergency::EmergencyRequest;
use medai_fixtures::{CannedResponse, FixtureStore};
use medai_labtests::LabTestBookingRequest;
use medai_reports::{ReportUpload, UploadState};
use medai_sim::{ActionFailure, SubmissionState};
use tokio_test::assert_err;

mod common;

#[test_log::test(tokio::test(start_paused = true))]
async fn test_appointment_with_doc_2_confirms_fee_45() {
    let portal = common::portal();
    let dashboard = common::dashboard(&portal);
    let appointments = dashboard.appointments().unwrap();

    let start = Instant::now();
    let completion = appointments
        .submit(AppointmentRequest {
            doctor_id: "doc-2".to_string(),
            date: common::day(),
            time_slot: "10:00 AM".to_string(),
            description: "Palpitations in the evening".to_string(),
        })
        .unwrap();
    assert_eq!(appointments.state(), SubmissionState::Submitting);

    let result = completion.wait().await.unwrap();

    assert!(start.elapsed() >= Duration::from_millis(500));
    let confirmation = result.value.unwrap();
    assert_eq!(confirmation.fee, Decimal::from(45));
    assert_eq!(
        confirmation.message,
        "Appointment request submitted. Consultation fee: $45 (mock)."
    );
    assert_eq!(appointments.confirmation(), Some(confirmation));
}

#[test_log::test(tokio::test(start_paused = true))]
async fn test_png_upload_analysis_equals_canned_analysis() {
    let portal = common::portal();
    let dashboard = common::dashboard(&portal);
    let reports = dashboard.reports().unwrap();

    let upload = ReportUpload::new("scan.png", "image/png", vec![1, 2, 3, 4]).unwrap();
    assert!(upload.preview().is_some());
    reports.select(upload).unwrap();

    let start = Instant::now();
    let result = reports.analyze().unwrap().wait().await.unwrap();

    assert!(start.elapsed() >= Duration::from_millis(2000));
    assert_eq!(result.value.as_ref(), Some(FixtureStore::global().report_analysis()));
    assert_eq!(reports.state().unwrap(), UploadState::Analyzed);
}

#[test_log::test(tokio::test(start_paused = true))]
async fn test_chat_turn_appends_user_then_follow_up() {
    let portal = common::portal();
    let dashboard = common::dashboard(&portal);
    let chat = dashboard.chat().unwrap();

    let completion = chat.respond_to("x").unwrap();
    assert_eq!(chat.state(), ConversationState::AwaitingReply);
    completion.wait().await.unwrap();

    let messages = chat.messages().unwrap();
    let tail: Vec<(MessageRole, &str)> = messages[messages.len() - 2..]
        .iter()
        .map(|m| (m.role, m.content.as_str()))
        .collect();
    assert_eq!(
        tail,
        vec![
            (MessageRole::User, "x"),
            (
                MessageRole::Assistant,
                FixtureStore::global().canned(CannedResponse::FollowUp)
            ),
        ]
    );

    let transcript: serde_json::Value =
        serde_json::from_str(&chat.transcript_json().unwrap()).unwrap();
    let entries = transcript.as_array().unwrap();
    assert_eq!(entries.len(), messages.len());
    assert_eq!(entries[entries.len() - 2]["content"], "x");
}

#[test_log::test(tokio::test)]
async fn test_dashboard_requires_session() {
    let portal = common::portal();

    let err = portal.dashboard().unwrap_err();
    assert!(matches!(err, Error::SessionAbsent));
    assert_eq!(err.surface(), Surface::Redirect);
    assert!(!err.is_recoverable());
}

#[test_log::test(tokio::test(start_paused = true))]
async fn test_signup_then_lab_booking() {
    let portal = common::portal();
    let session = portal
        .signup(SignupRequest {
            username: "morgan".to_string(),
            email: "morgan@example.com".to_string(),
            phone: None,
            password: "hunter22".to_string(),
            confirm_password: "hunter22".to_string(),
            agree_terms: true,
        })
        .unwrap();
    let dashboard = portal.dashboard().unwrap();
    assert_eq!(dashboard.user().unwrap(), session.user);

    let lab_tests = dashboard.lab_tests().unwrap();
    let result = lab_tests
        .submit(LabTestBookingRequest {
            test_id: "lab-2".to_string(),
            date: common::day(),
            time_slot: "04:00 PM".to_string(),
            address: "9 Orchard Lane".to_string(),
        })
        .unwrap()
        .wait()
        .await
        .unwrap();

    let confirmation = result.into_result().unwrap();
    assert_eq!(confirmation.test.id, "lab-2");
    assert_eq!(lab_tests.state(), SubmissionState::Confirmed);
}

#[test_log::test(tokio::test(start_paused = true))]
async fn test_emergency_dispatch_uses_mock_location() {
    let portal = common::portal();
    let dashboard = common::dashboard(&portal);
    let emergency = dashboard.emergency().unwrap();

    let start = Instant::now();
    let dispatch = emergency
        .submit(EmergencyRequest {
            patient_name: "Jo".to_string(),
            age: 120,
            description: "Collapsed while gardening".to_string(),
        })
        .unwrap()
        .wait()
        .await
        .unwrap()
        .into_result()
        .unwrap();

    assert!(start.elapsed() >= Duration::from_millis(1500));
    assert_eq!(dispatch.location, "123 Main St, City (Mock)");
    assert!(dispatch.reference.starts_with("EMG-"));
}

#[test_log::test(tokio::test(start_paused = true))]
async fn test_injected_failures_surface_as_recoverable_banners() {
    let portal = common::portal_with(Config {
        failure_probability: 1.0,
        ..Config::default()
    });
    let dashboard = common::dashboard(&portal);

    let chat = dashboard.chat().unwrap();
    chat.respond_to("are you there?").unwrap().wait().await.unwrap();
    let failure = chat.last_failure().unwrap();
    assert!(matches!(failure, ActionFailure::Injected(_)));

    let err: Error = failure.into();
    assert_eq!(err.surface(), Surface::Banner);
    assert!(err.is_recoverable());

    // The retry fails again but never duplicates the user message
    chat.retry().unwrap().wait().await.unwrap();
    let users = chat
        .messages()
        .unwrap()
        .iter()
        .filter(|m| m.role == MessageRole::User)
        .count();
    assert_eq!(users, 1);
}

#[test_log::test(tokio::test(start_paused = true))]
async fn test_logout_discards_pending_reply_and_history() {
    let portal = common::portal();
    let dashboard = common::dashboard(&portal);
    let chat = dashboard.chat().unwrap();
    let completion = chat.respond_to("hello").unwrap();

    portal.logout().unwrap();

    assert!(matches!(dashboard.chat(), Err(Error::SessionAbsent)));
    assert_err!(completion.wait().await);
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(chat.messages().unwrap().len(), 1);
}

#[test_log::test(tokio::test(start_paused = true))]
async fn test_next_user_never_sees_previous_chat() {
    let portal = common::portal();
    let first = common::dashboard(&portal);
    let completion = first
        .chat()
        .unwrap()
        .respond_to("private symptom")
        .unwrap();

    portal.logout().unwrap();
    portal
        .login(LoginRequest {
            email: "second.patient@example.com".to_string(),
            password: "pw".to_string(),
        })
        .unwrap();

    assert!(matches!(first.user(), Err(Error::SessionAbsent)));
    assert!(matches!(first.chat(), Err(Error::SessionAbsent)));
    assert_err!(completion.wait().await);

    let second = portal.dashboard().unwrap();
    assert_eq!(second.user().unwrap().username, "second.patient");
    let messages = second.chat().unwrap().messages().unwrap();
    assert_eq!(messages.len(), 1);
    assert!(messages.iter().all(|m| m.content != "private symptom"));
}

#[test_log::test(tokio::test(start_paused = true))]
async fn test_sign_out_discards_pending_actions() {
    let portal = common::portal();
    let dashboard = common::dashboard(&portal);
    let completion = dashboard.chat().unwrap().respond_to("hello").unwrap();

    dashboard.sign_out().unwrap();

    assert_err!(completion.wait().await);
    assert!(portal.dashboard().is_err());
}
