//! Request validation helpers

use validator::Validate;

use crate::{Error, Result};

/// Validate a request before any action is invoked.
///
/// All field errors are folded into a single `Error::Validation`.
pub fn validate_request<T: Validate>(request: &T) -> Result<()> {
    request
        .validate()
        .map_err(|e| Error::Validation(format!("Validation failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Validate)]
    struct TestPayload {
        #[validate(length(min = 1, max = 10))]
        name: String,
        #[validate(range(min = 1, max = 120))]
        age: u32,
    }

    #[test]
    fn test_valid_request_passes() {
        let payload = TestPayload {
            name: "hello".to_string(),
            age: 30,
        };
        assert!(validate_request(&payload).is_ok());
    }

    #[test]
    fn test_invalid_request_is_validation_error() {
        let payload = TestPayload {
            name: String::new(),
            age: 30,
        };
        let err = validate_request(&payload).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn test_out_of_range_names_field() {
        let payload = TestPayload {
            name: "ok".to_string(),
            age: 0,
        };
        let err = validate_request(&payload).unwrap_err();
        assert!(err.to_string().contains("age"));
    }
}
