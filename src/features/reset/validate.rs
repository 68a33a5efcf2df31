//! Pure validation for the three reset forms. Each form is a typed record and
//! validation returns either the cleaned value or a `ValidationError`; nothing
//! here touches the network or the flow state.

use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Number of digits in a reset code.
pub const CODE_LENGTH: usize = 6;
/// Minimum length (in characters) of a new password.
pub const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("email is required")]
    EmailRequired,
    #[error("email address looks invalid")]
    EmailInvalid,
    #[error("enter the 6-digit code")]
    CodeFormat,
    #[error("password must be at least 6 characters")]
    PasswordTooShort,
    #[error("passwords do not match")]
    PasswordMismatch,
}

/// Email entry form.
#[derive(Clone, Debug, Default)]
pub struct EmailForm {
    pub email: String,
}

impl EmailForm {
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }

    /// # Errors
    /// Returns `EmailRequired` for blank input and `EmailInvalid` for malformed addresses.
    pub fn validate(&self) -> Result<String, ValidationError> {
        validate_email(&self.email)
    }
}

/// Code entry form. `code` holds whatever the user typed.
#[derive(Clone, Debug, Default)]
pub struct CodeForm {
    pub code: String,
}

impl CodeForm {
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }

    /// # Errors
    /// Returns `CodeFormat` unless the sanitized input is exactly six digits.
    pub fn validate(&self) -> Result<String, ValidationError> {
        validate_code(&self.code)
    }
}

/// New password form. Both fields stay wrapped so they never reach logs.
pub struct PasswordForm {
    pub password: SecretString,
    pub confirmation: SecretString,
}

impl PasswordForm {
    #[must_use]
    pub fn new(password: SecretString, confirmation: SecretString) -> Self {
        Self {
            password,
            confirmation,
        }
    }

    /// # Errors
    /// Returns `PasswordTooShort` or `PasswordMismatch`, checked in that order.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_password(&self.password, &self.confirmation)
    }
}

impl std::fmt::Debug for PasswordForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordForm")
            .field("password", &"***")
            .field("confirmation", &"***")
            .finish()
    }
}

/// Trims the address and checks its basic `local@domain.tld` shape.
///
/// # Errors
/// Returns `EmailRequired` for blank input and `EmailInvalid` for malformed addresses.
pub fn validate_email(input: &str) -> Result<String, ValidationError> {
    let email = input.trim();
    if email.is_empty() {
        return Err(ValidationError::EmailRequired);
    }
    if !valid_email(email) {
        return Err(ValidationError::EmailInvalid);
    }
    Ok(email.to_string())
}

fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|regex| regex.is_match(email))
}

/// Mirrors the code input field: non-digits are dropped and the result is cut to six.
#[must_use]
pub fn sanitize_code(input: &str) -> String {
    input
        .chars()
        .filter(char::is_ascii_digit)
        .take(CODE_LENGTH)
        .collect()
}

/// # Errors
/// Returns `CodeFormat` unless the sanitized input is exactly six digits.
pub fn validate_code(input: &str) -> Result<String, ValidationError> {
    let code = sanitize_code(input);
    if code.len() == CODE_LENGTH {
        Ok(code)
    } else {
        Err(ValidationError::CodeFormat)
    }
}

/// # Errors
/// Returns `PasswordTooShort` or `PasswordMismatch`, checked in that order.
pub fn validate_password(
    password: &SecretString,
    confirmation: &SecretString,
) -> Result<(), ValidationError> {
    let password = password.expose_secret();
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort);
    }
    if password != confirmation.expose_secret() {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}
