//! Account creation: local validation, backend call, error classification.
//!
//! ERROR HANDLING
//! ==============
//! Field problems are collected up front and never reach the network. A
//! backend rejection is read from its `{ error }` body; a duplicate email is
//! singled out so the caller can offer a login link instead.

use tracing::{info, warn};

use crate::net::api::AuthApi;
use crate::net::types::{ApiError, ApiErrorBody, SignupRequest, SignupResponse};
use crate::state::auth::AuthState;

pub const MIN_PASSWORD_LEN: usize = 6;
pub const FALLBACK_ERROR: &str = "An unexpected error occurred.";
const EMAIL_EXISTS_MARKER: &str = "Email already exists";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupField {
    Name,
    Email,
    Password,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: SignupField,
    pub message: &'static str,
}

#[derive(Debug, thiserror::Error)]
pub enum SignupError {
    #[error("signup form has {} invalid field(s)", .0.len())]
    Validation(Vec<FieldError>),
    #[error("{0}")]
    EmailExists(String),
    #[error("{0}")]
    Rejected(String),
    #[error("network error: {0}")]
    Network(ApiError),
}

/// Check every field, returning at most one message per field.
#[must_use]
pub fn validate(request: &SignupRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if request.name.trim().is_empty() {
        errors.push(FieldError { field: SignupField::Name, message: "Name cannot be empty." });
    }

    let email = request.email.trim();
    if email.is_empty() {
        errors.push(FieldError { field: SignupField::Email, message: "Email cannot be empty." });
    } else if !(email.contains('@') && email.contains('.')) {
        errors.push(FieldError { field: SignupField::Email, message: "Please enter a valid email address." });
    }

    if request.password.trim().is_empty() {
        errors.push(FieldError { field: SignupField::Password, message: "Password cannot be empty." });
    } else if request.password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(FieldError { field: SignupField::Password, message: "Password must be at least 6 characters." });
    }

    errors
}

/// Map a failed signup call onto what the form should show.
#[must_use]
pub fn classify(error: ApiError) -> SignupError {
    match error {
        ApiError::Response { body, .. } => {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| FALLBACK_ERROR.to_string());
            if message.contains(EMAIL_EXISTS_MARKER) {
                SignupError::EmailExists(message)
            } else {
                SignupError::Rejected(message)
            }
        }
        ApiError::Parse(_) => SignupError::Rejected(FALLBACK_ERROR.to_string()),
        other => SignupError::Network(other),
    }
}

/// Validate, submit, and on success sign the new parent in.
///
/// # Errors
///
/// Returns [`SignupError::Validation`] without calling the backend when any
/// field is invalid, otherwise the classified backend failure.
pub async fn signup(api: &dyn AuthApi, auth: &mut AuthState, request: &SignupRequest) -> Result<SignupResponse, SignupError> {
    let errors = validate(request);
    if !errors.is_empty() {
        return Err(SignupError::Validation(errors));
    }

    match api.signup(request).await {
        Ok(response) => {
            info!(email = %response.new_user.email, "signup: account created");
            auth.login(response.token.clone(), Some(response.new_user.clone()));
            Ok(response)
        }
        Err(e) => {
            warn!(error = %e, "signup: rejected");
            Err(classify(e))
        }
    }
}

#[cfg(test)]
#[path = "signup_test.rs"]
mod tests;
