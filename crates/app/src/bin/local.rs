// MedAI Portal - Local walkthrough of every dashboard flow

use chrono::Utc;
use tracing::{error, info, warn};

use medai_app::Portal;
use medai_appointments::{date_options, AppointmentRequest};
use medai_auth::LoginRequest;
use medai_common::Error;
use medai_emergency::EmergencyRequest;
use medai_labtests::LabTestBookingRequest;
use medai_reports::ReportUpload;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let portal = Portal::from_env().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&portal.config().rust_log));
    tracing_subscriber::fmt().with_env_filter(filter).pretty().init();

    info!(config = ?portal.config(), "Starting MedAI portal walkthrough");

    match portal.dashboard() {
        Err(Error::SessionAbsent) => info!("Dashboard refused without a session"),
        Err(e) => return Err(e.into()),
        Ok(_) => warn!("Dashboard opened without a session"),
    }

    let session = portal.login(LoginRequest {
        email: "demo.patient@example.com".to_string(),
        password: "demo".to_string(),
    })?;
    info!(username = %session.user.username, "Logged in");

    let dashboard = portal.dashboard()?;

    // Chat
    let chat = dashboard.chat()?;
    let reply = chat
        .respond_to("I've had a sore throat and mild fever for two days")?
        .wait()
        .await?;
    if let Some(failure) = &reply.error {
        warn!(error = %failure, "Chat reply failed");
    }
    println!("{}", chat.transcript_json()?);

    // Appointment
    let today = Utc::now().date_naive();
    let appointments = dashboard.appointments()?;
    let booking = appointments
        .submit(AppointmentRequest {
            doctor_id: "doc-2".to_string(),
            date: date_options(today)[1],
            time_slot: appointments.time_slots()[0].to_string(),
            description: "Occasional chest tightness after exercise".to_string(),
        })?
        .wait()
        .await?;
    match booking.into_result() {
        Ok(confirmation) => println!("{}", serde_json::to_string_pretty(&confirmation)?),
        Err(failure) => warn!(error = %failure, "Appointment failed"),
    }

    // Report analysis
    let reports = dashboard.reports()?;
    reports.select(ReportUpload::new(
        "chest-xray.png",
        "image/png",
        vec![0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a],
    )?)?;
    let analysis = reports.analyze()?.wait().await?;
    match analysis.into_result() {
        Ok(analysis) => println!("{}", serde_json::to_string_pretty(&analysis)?),
        Err(failure) => warn!(error = %failure, "Report analysis failed"),
    }

    // Lab test
    let lab_tests = dashboard.lab_tests()?;
    let lab = lab_tests
        .submit(LabTestBookingRequest {
            test_id: lab_tests.tests()[0].id.clone(),
            date: today,
            time_slot: "09:00 AM".to_string(),
            address: "221B Baker Street".to_string(),
        })?
        .wait()
        .await?;
    match lab.into_result() {
        Ok(confirmation) => println!("{}", confirmation.message),
        Err(failure) => warn!(error = %failure, "Lab booking failed"),
    }

    // Emergency
    let emergency = dashboard.emergency()?;
    info!(location = emergency.detected_location(), "Location detected");
    let dispatch = emergency
        .submit(EmergencyRequest {
            patient_name: "Demo Patient".to_string(),
            age: 34,
            description: "Sudden severe allergic reaction with swelling".to_string(),
        })?
        .wait()
        .await?;
    match dispatch.into_result() {
        Ok(dispatch) => println!("{}: {}", dispatch.reference, dispatch.message),
        Err(failure) => warn!(error = %failure, "Emergency request failed"),
    }

    dashboard.sign_out()?;
    if let Err(e) = portal.dashboard() {
        info!(code = e.error_code(), "Signed out");
    } else {
        error!("Dashboard still reachable after sign out");
    }

    Ok(())
}
