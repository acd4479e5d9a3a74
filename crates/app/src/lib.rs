//! MedAI portal composition root
//!
//! Builds every dashboard flow from configuration and puts the session check
//! in front of each of them.

use std::sync::Arc;

use uuid::Uuid;

use medai_auth::{LoginRequest, Session, SessionStore, SessionUser, SignupRequest};
use medai_common::{Config, Error, Result};
use medai_conversations::ChatSession;
use medai_appointments::AppointmentFlow;
use medai_emergency::EmergencyFlow;
use medai_labtests::LabTestFlow;
use medai_reports::ReportFlow;

/// Entry point of the portal: authentication plus access to the dashboard
#[derive(Debug, Clone)]
pub struct Portal {
    config: Config,
    sessions: SessionStore,
}

impl Portal {
    pub fn new(config: Config, sessions: SessionStore) -> Self {
        Self { config, sessions }
    }

    /// Portal configured from the environment, with no one logged in
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self::new(Config::from_env()?, SessionStore::new()))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn login(&self, request: LoginRequest) -> Result<Session> {
        medai_auth::login(&self.sessions, request)
    }

    pub fn signup(&self, request: SignupRequest) -> Result<Session> {
        medai_auth::signup(&self.sessions, request)
    }

    pub fn logout(&self) -> Result<()> {
        medai_auth::logout(&self.sessions)
    }

    /// Open the dashboard; `SessionAbsent` redirects to login
    pub fn dashboard(&self) -> Result<Dashboard> {
        let session = guard(&self.sessions)?;
        tracing::info!(session_id = %session.id, "Dashboard opened");
        Dashboard::open(&self.config, self.sessions.clone(), session.id)
    }
}

/// One flow per feature, owned by a single session
#[derive(Debug)]
struct Flows {
    chat: ChatSession,
    appointments: AppointmentFlow,
    emergency: EmergencyFlow,
    reports: ReportFlow,
    lab_tests: LabTestFlow,
}

impl Flows {
    fn new(config: &Config) -> Self {
        Self {
            chat: ChatSession::simulated(config),
            appointments: AppointmentFlow::simulated(config),
            emergency: EmergencyFlow::simulated(config),
            reports: ReportFlow::simulated(config),
            lab_tests: LabTestFlow::simulated(config),
        }
    }

    /// Discard pending actions and the chat history
    fn teardown(&self) {
        let results = [
            ("chat", self.chat.clear()),
            ("appointments", self.appointments.cancel().map(|_| ())),
            ("emergency", self.emergency.cancel().map(|_| ())),
            ("reports", self.reports.clear()),
            ("lab_tests", self.lab_tests.cancel().map(|_| ())),
        ];
        for (flow, result) in results {
            if let Err(e) = result {
                tracing::warn!(flow, error = %e, "Flow teardown failed");
            }
        }
    }
}

/// The signed-in area, bound to the session it was opened for.
///
/// Each accessor checks that this session is still the current one, so
/// logging out or logging in as someone else closes every entry point. When
/// the session ends its pending actions and chat history are discarded, no
/// matter which `SessionStore` handle ended it.
#[derive(Debug)]
pub struct Dashboard {
    session_id: Uuid,
    sessions: SessionStore,
    flows: Arc<Flows>,
}

impl Dashboard {
    fn open(config: &Config, sessions: SessionStore, session_id: Uuid) -> Result<Self> {
        let flows = Arc::new(Flows::new(config));

        let owned = Arc::downgrade(&flows);
        sessions.on_end(session_id, move || {
            if let Some(flows) = owned.upgrade() {
                tracing::info!(%session_id, "Session ended, discarding dashboard state");
                flows.teardown();
            }
        })?;

        Ok(Self {
            session_id,
            sessions,
            flows,
        })
    }

    /// The signed-in user shown in the header
    pub fn user(&self) -> Result<SessionUser> {
        Ok(self.guard()?.user)
    }

    pub fn chat(&self) -> Result<&ChatSession> {
        self.guard()?;
        Ok(&self.flows.chat)
    }

    pub fn appointments(&self) -> Result<&AppointmentFlow> {
        self.guard()?;
        Ok(&self.flows.appointments)
    }

    pub fn emergency(&self) -> Result<&EmergencyFlow> {
        self.guard()?;
        Ok(&self.flows.emergency)
    }

    pub fn reports(&self) -> Result<&ReportFlow> {
        self.guard()?;
        Ok(&self.flows.reports)
    }

    pub fn lab_tests(&self) -> Result<&LabTestFlow> {
        self.guard()?;
        Ok(&self.flows.lab_tests)
    }

    /// End this dashboard's session and discard every flow.
    ///
    /// Leaves a newer session started elsewhere untouched.
    pub fn sign_out(self) -> Result<()> {
        if self.sessions.end(self.session_id)?.is_none() {
            self.flows.teardown();
        }
        Ok(())
    }

    fn guard(&self) -> Result<Session> {
        let session = guard(&self.sessions)?;
        if session.id != self.session_id {
            tracing::info!(
                session_id = %self.session_id,
                current = %session.id,
                "Dashboard belongs to an ended session, redirecting to login"
            );
            return Err(Error::SessionAbsent);
        }
        Ok(session)
    }
}

fn guard(sessions: &SessionStore) -> Result<Session> {
    sessions.require().inspect_err(|_| {
        tracing::info!("No active session, redirecting to login");
    })
}
