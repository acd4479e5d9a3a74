//! Login and signup requests

use medai_common::{validate_request, Result};
use serde::Deserialize;
use validator::Validate;

use crate::store::SessionStore;
use crate::types::{Session, SessionUser};

/// Request for logging in
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Valid email required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Request for creating an account
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 2, message = "Username must be at least 2 characters"))]
    pub username: String,

    #[validate(email(message = "Valid email required"))]
    pub email: String,

    pub phone: Option<String>,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub confirm_password: String,

    #[validate(custom(function = "validate_terms_accepted"))]
    pub agree_terms: bool,
}

fn validate_terms_accepted(agreed: &bool) -> std::result::Result<(), validator::ValidationError> {
    if *agreed {
        Ok(())
    } else {
        let mut error = validator::ValidationError::new("terms_not_accepted");
        error.message = Some("You must accept the terms and conditions".into());
        Err(error)
    }
}

/// Validate credentials and start a mock session.
///
/// Any well-formed email and non-empty password is accepted.
pub fn login(store: &SessionStore, request: LoginRequest) -> Result<Session> {
    validate_request(&request)?;

    let session = Session::new(SessionUser::from_email(&request.email));
    store.set(session.clone())?;
    Ok(session)
}

/// Validate a signup form and start a mock session for the new account
pub fn signup(store: &SessionStore, request: SignupRequest) -> Result<Session> {
    validate_request(&request)?;

    let phone = request
        .phone
        .map(|phone| phone.trim().to_string())
        .filter(|phone| !phone.is_empty());

    let session = Session::new(SessionUser {
        username: request.username,
        email: request.email,
        phone,
    });
    store.set(session.clone())?;
    Ok(session)
}

/// End the current session, if any
pub fn logout(store: &SessionStore) -> Result<()> {
    store.clear()?;
    Ok(())
}
