//! Common error types and handling for the MedAI portal

/// Common result type
pub type Result<T> = std::result::Result<T, Error>;

/// Where an error is shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// Next to the offending form field
    Inline,
    /// Dismissible banner above the flow
    Banner,
    /// Not shown; the caller routes to the login page
    Redirect,
}

/// Common error type for the MedAI portal
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unexpected error: {0}")]
    Unexpected(#[from] anyhow::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Action failed: {0}")]
    ActionFailed(String),

    #[error("No active session")]
    SessionAbsent,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Get where this error should be surfaced
    pub fn surface(&self) -> Surface {
        match self {
            Error::Validation(_) | Error::NotFound(_) => Surface::Inline,
            Error::SessionAbsent => Surface::Redirect,
            Error::ActionFailed(_)
            | Error::Conflict(_)
            | Error::Unexpected(_)
            | Error::Serialization(_)
            | Error::Internal(_) => Surface::Banner,
        }
    }

    /// Whether the user can fix this in place (correct input or retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Validation(_) | Error::ActionFailed(_) | Error::Conflict(_) | Error::NotFound(_)
        )
    }

    /// Get the error code for rendering
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Unexpected(_) => "UNEXPECTED_ERROR",
            Error::Serialization(_) => "SERIALIZATION_ERROR",
            Error::Validation(_) => "VALIDATION_ERROR",
            Error::ActionFailed(_) => "ACTION_FAILED",
            Error::SessionAbsent => "SESSION_ABSENT",
            Error::Conflict(_) => "CONFLICT",
            Error::NotFound(_) => "NOT_FOUND",
            Error::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_surfaces() {
        assert_eq!(
            Error::Validation("test".to_string()).surface(),
            Surface::Inline
        );
        assert_eq!(
            Error::NotFound("test".to_string()).surface(),
            Surface::Inline
        );
        assert_eq!(
            Error::ActionFailed("test".to_string()).surface(),
            Surface::Banner
        );
        assert_eq!(Error::SessionAbsent.surface(), Surface::Redirect);
    }

    #[test]
    fn test_internal_error_is_banner() {
        assert_eq!(
            Error::Internal("test".to_string()).surface(),
            Surface::Banner
        );
    }

    #[test]
    fn test_session_absent_not_recoverable() {
        assert!(!Error::SessionAbsent.is_recoverable());
        assert!(!Error::Internal("test".to_string()).is_recoverable());
    }

    #[test]
    fn test_validation_and_action_failures_recoverable() {
        assert!(Error::Validation("test".to_string()).is_recoverable());
        assert!(Error::ActionFailed("test".to_string()).is_recoverable());
        assert!(Error::Conflict("test".to_string()).is_recoverable());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            Error::Validation("test".to_string()).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            Error::ActionFailed("test".to_string()).error_code(),
            "ACTION_FAILED"
        );
        assert_eq!(Error::SessionAbsent.error_code(), "SESSION_ABSENT");
        assert_eq!(Error::Conflict("test".to_string()).error_code(), "CONFLICT");
        assert_eq!(
            Error::Internal("test".to_string()).error_code(),
            "INTERNAL_ERROR"
        );
    }

    #[test]
    fn test_anyhow_converts_to_unexpected() {
        let err: Error = anyhow::anyhow!("boom").into();
        assert!(matches!(err, Error::Unexpected(_)));
        assert!(err.to_string().contains("boom"));
    }
}
