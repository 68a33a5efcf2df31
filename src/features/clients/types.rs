//! Client (customer) records. A client wraps a user account and adds a CPF and
//! birth date; the backend reports record-level validation through `valid`
//! and `mensagemErro` instead of an HTTP error.

use crate::features::users::{User, UserPayload};
use regex::Regex;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// Number of digits in a CPF.
pub const CPF_LENGTH: usize = 11;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Client {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub cpf: String,
    #[serde(rename = "dataNascimento", default)]
    pub birth_date: String,
    #[serde(rename = "usuario", default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(rename = "statusCliente", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default = "default_valid", skip_serializing)]
    pub valid: bool,
    #[serde(rename = "mensagemErro", default, skip_serializing)]
    pub error_message: Option<String>,
}

fn default_valid() -> bool {
    true
}

impl Client {
    /// Display name, taken from the linked user account.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.name.as_str())
    }

    /// Backend validation message, ignoring the empty string it uses for "no error".
    #[must_use]
    pub fn rejection(&self) -> Option<&str> {
        if self.valid {
            return None;
        }
        Some(
            self.error_message
                .as_deref()
                .map(str::trim)
                .filter(|message| !message.is_empty())
                .unwrap_or("Client was rejected."),
        )
    }
}

/// Body for creating or replacing a client together with its user account.
#[derive(Debug)]
pub struct ClientPayload {
    pub cpf: String,
    /// ISO date, `YYYY-MM-DD`.
    pub birth_date: String,
    pub user: UserPayload,
    pub status: Option<String>,
}

#[derive(Serialize)]
pub(super) struct ClientPayloadWire<'a> {
    cpf: &'a str,
    #[serde(rename = "dataNascimento")]
    birth_date: &'a str,
    usuario: &'a UserPayload,
    #[serde(rename = "statusCliente", skip_serializing_if = "Option::is_none")]
    status: Option<&'a str>,
}

impl ClientPayload {
    pub(super) fn wire<'a>(
        cpf: &'a str,
        birth_date: &'a str,
        payload: &'a ClientPayload,
    ) -> ClientPayloadWire<'a> {
        ClientPayloadWire {
            cpf,
            birth_date,
            usuario: &payload.user,
            status: payload.status.as_deref(),
        }
    }
}

impl Serialize for ClientPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Self::wire(&self.cpf, &self.birth_date, self).serialize(serializer)
    }
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ClientFieldError {
    #[error("CPF is required")]
    CpfRequired,
    #[error("CPF must contain 11 digits")]
    CpfLength,
    #[error("CPF is invalid")]
    CpfInvalid,
    #[error("birth date must be YYYY-MM-DD")]
    BirthDateFormat,
}

/// Strips punctuation from a CPF and checks both verification digits.
///
/// # Errors
/// Returns a `ClientFieldError` describing the first problem found.
pub fn normalize_cpf(input: &str) -> Result<String, ClientFieldError> {
    if input.trim().is_empty() {
        return Err(ClientFieldError::CpfRequired);
    }

    let digits: Vec<u32> = input.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != CPF_LENGTH {
        return Err(ClientFieldError::CpfLength);
    }

    // repeated digits pass the checksum but are never issued
    if digits.iter().all(|digit| *digit == digits[0]) {
        return Err(ClientFieldError::CpfInvalid);
    }

    if check_digit(&digits[..9]) != digits[9] || check_digit(&digits[..10]) != digits[10] {
        return Err(ClientFieldError::CpfInvalid);
    }

    Ok(digits
        .iter()
        .filter_map(|digit| char::from_digit(*digit, 10))
        .collect())
}

fn check_digit(digits: &[u32]) -> u32 {
    let weight_start = u32::try_from(digits.len()).unwrap_or(0) + 1;
    let sum: u32 = digits
        .iter()
        .zip((2..=weight_start).rev())
        .map(|(digit, weight)| digit * weight)
        .sum();
    let digit = 11 - (sum % 11);
    if digit >= 10 {
        0
    } else {
        digit
    }
}

/// # Errors
/// Returns `BirthDateFormat` unless the value looks like `YYYY-MM-DD`.
pub fn validate_birth_date(input: &str) -> Result<String, ClientFieldError> {
    let trimmed = input.trim();
    let valid = Regex::new(r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$")
        .is_ok_and(|regex| regex.is_match(trimmed));
    if valid {
        Ok(trimmed.to_string())
    } else {
        Err(ClientFieldError::BirthDateFormat)
    }
}
