//! Report upload and analysis flow

use std::sync::{Arc, Mutex, MutexGuard};

use medai_common::{Config, Error, Result};
use medai_fixtures::{FixtureStore, ReportAnalysis};
use medai_sim::{ActionFailure, Completion, DelayedResponder, Responder, SimulatedAction};

use crate::domain::entities::ReportUpload;
use crate::domain::state::{UploadEvent, UploadState, UploadStateMachine};

/// Action name used in logs and errors
pub const REPORT_ANALYSIS_ACTION: &str = "report_analysis";

/// File selection plus a simulated analysis of the selected file.
///
/// Selecting another file or removing the current one discards any analysis,
/// pending or finished.
#[derive(Debug)]
pub struct ReportFlow {
    upload: Mutex<Option<ReportUpload>>,
    analysis: SimulatedAction<ReportUpload, ReportAnalysis>,
}

impl ReportFlow {
    pub fn new(responder: Arc<dyn Responder<ReportUpload, ReportAnalysis>>) -> Self {
        Self {
            upload: Mutex::new(None),
            analysis: SimulatedAction::new(REPORT_ANALYSIS_ACTION, responder),
        }
    }

    /// Flow returning the canned analysis after the configured delay
    pub fn simulated(config: &Config) -> Self {
        let responder = DelayedResponder::new(config.report_analysis_delay(), |_: ReportUpload| {
            Ok(FixtureStore::global().report_analysis().clone())
        })
        .with_config(config);
        Self::new(Arc::new(responder))
    }

    pub fn state(&self) -> Result<UploadState> {
        let upload = self.lock_upload()?;
        Ok(self.state_of(&upload))
    }

    /// The selected file, if any
    pub fn upload(&self) -> Result<Option<ReportUpload>> {
        Ok(self.lock_upload()?.clone())
    }

    pub fn analysis(&self) -> Option<ReportAnalysis> {
        self.analysis.snapshot().ok().and_then(|result| result.value)
    }

    pub fn last_failure(&self) -> Option<ActionFailure> {
        self.analysis.snapshot().ok().and_then(|result| result.error)
    }

    /// Choose a file, replacing the current one and clearing its analysis
    pub fn select(&self, upload: ReportUpload) -> Result<UploadState> {
        let mut current = self.lock_upload()?;
        let next = self.transition(&current, UploadEvent::Select)?;

        self.discard_analysis()?;
        tracing::info!(
            upload_id = %upload.id,
            mime_type = %upload.mime_type,
            size_bytes = upload.size_bytes,
            "Report selected"
        );
        *current = Some(upload);
        Ok(next)
    }

    /// Remove the selected file and any analysis
    pub fn remove(&self) -> Result<()> {
        let mut current = self.lock_upload()?;
        self.transition(&current, UploadEvent::Remove)?;

        self.discard_analysis()?;
        if let Some(upload) = current.take() {
            tracing::info!(upload_id = %upload.id, "Report removed");
        }
        Ok(())
    }

    /// Drop the file and any analysis, pending or finished. No-op when empty.
    pub fn clear(&self) -> Result<()> {
        let mut current = self.lock_upload()?;
        self.discard_analysis()?;
        if let Some(upload) = current.take() {
            tracing::info!(upload_id = %upload.id, "Report discarded");
        }
        Ok(())
    }

    /// Start analyzing the selected file; also retries a failed analysis
    pub fn analyze(&self) -> Result<Completion<ReportAnalysis>> {
        let current = self.lock_upload()?;
        self.transition(&current, UploadEvent::Analyze)?;

        let upload = current
            .clone()
            .ok_or_else(|| Error::Internal("Analyzing without a selected file".to_string()))?;

        tracing::info!(upload_id = %upload.id, "Report analysis requested");
        Ok(self.analysis.invoke(upload)?)
    }

    fn state_of(&self, upload: &Option<ReportUpload>) -> UploadState {
        UploadState::derive(upload.is_some(), self.analysis.status())
    }

    fn transition(&self, upload: &Option<ReportUpload>, event: UploadEvent) -> Result<UploadState> {
        UploadStateMachine::transition(self.state_of(upload), event)
            .map_err(|e| Error::Conflict(e.to_string()))
    }

    fn discard_analysis(&self) -> Result<()> {
        self.analysis.cancel()?;
        self.analysis.reset()?;
        Ok(())
    }

    fn lock_upload(&self) -> Result<MutexGuard<'_, Option<ReportUpload>>> {
        self.upload
            .lock()
            .map_err(|_| Error::Internal("Upload lock poisoned".to_string()))
    }
}
