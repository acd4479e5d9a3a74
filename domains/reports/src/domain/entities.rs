//! Domain entities for the Reports domain

use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use medai_common::{Error, Result};

/// Accepted report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MimeType {
    #[serde(rename = "application/pdf")]
    Pdf,
    #[serde(rename = "image/jpeg")]
    Jpeg,
    #[serde(rename = "image/jpg")]
    Jpg,
    #[serde(rename = "image/png")]
    Png,
}

impl MimeType {
    /// Every accepted type, in picker order
    pub const ACCEPTED: &'static [MimeType] = &[Self::Pdf, Self::Jpeg, Self::Png, Self::Jpg];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Jpeg => "image/jpeg",
            Self::Jpg => "image/jpg",
            Self::Png => "image/png",
        }
    }

    pub fn is_image(&self) -> bool {
        !matches!(self, Self::Pdf)
    }
}

impl std::str::FromStr for MimeType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ACCEPTED
            .iter()
            .copied()
            .find(|mime| mime.as_str() == normalized)
            .ok_or_else(|| {
                Error::Validation(format!(
                    "Unsupported file type '{}'; upload a PDF, JPG or PNG",
                    s
                ))
            })
    }
}

impl std::fmt::Display for MimeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A report file chosen by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportUpload {
    pub id: Uuid,
    pub file_name: String,
    pub mime_type: MimeType,
    pub size_bytes: usize,
    pub selected_at: DateTime<Utc>,
    #[serde(skip)]
    bytes: Vec<u8>,
}

impl ReportUpload {
    /// Accept a file if its type is one of the supported formats
    pub fn new(file_name: impl Into<String>, mime_type: &str, bytes: Vec<u8>) -> Result<Self> {
        let file_name = file_name.into();
        if file_name.trim().is_empty() {
            return Err(Error::Validation("File name is required".to_string()));
        }
        let mime_type = mime_type.parse::<MimeType>()?;

        Ok(Self {
            id: Uuid::new_v4(),
            file_name,
            mime_type,
            size_bytes: bytes.len(),
            selected_at: Utc::now(),
            bytes,
        })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size for display, e.g. `"12.5 KB"`
    pub fn size_label(&self) -> String {
        format!("{:.1} KB", self.size_bytes as f64 / 1024.0)
    }

    /// Inline `data:` URL for image uploads; PDFs have no preview
    pub fn preview(&self) -> Option<String> {
        if !self.mime_type.is_image() {
            return None;
        }
        Some(format!(
            "data:{};base64,{}",
            self.mime_type,
            STANDARD.encode(&self.bytes)
        ))
    }
}
