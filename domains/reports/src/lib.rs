//! Reports domain: medical report upload and mock analysis

pub mod domain;
pub mod flow;

pub use domain::entities::{MimeType, ReportUpload};
pub use domain::state::{StateError, UploadEvent, UploadState, UploadStateMachine};
pub use flow::{ReportFlow, REPORT_ANALYSIS_ACTION};
