//! Login call. The backend answers 401 for bad credentials and for inactive
//! accounts alike; both surface as the same message.

use super::types::{LoginRequest, LoginResponse};
use crate::api::{ApiClient, ApiError};
use crate::features::reset::validate::validate_email;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

pub const LOGIN_PATH: &str = "/usuario/authenticate";

/// Shown instead of the raw 401 body.
pub const INVALID_CREDENTIALS: &str = "Invalid email or password.";

/// Authenticates with email and password.
///
/// # Errors
/// Returns `ApiError::Config` for blank input, `ApiError::Http` with status
/// 401 and a generic message for rejected credentials, otherwise any request error.
#[instrument(skip(api, password))]
pub async fn login(
    api: &ApiClient,
    email: &str,
    password: &SecretString,
) -> Result<LoginResponse, ApiError> {
    let email = validate_email(email).map_err(|err| ApiError::Config(capitalize(&err.to_string())))?;
    if password.expose_secret().is_empty() {
        return Err(ApiError::Config("Password is required.".to_string()));
    }

    let request = LoginRequest::new(&email, password);
    match api.post_json::<_, LoginResponse>(LOGIN_PATH, &request).await {
        Ok(response) => {
            debug!(has_token = response.token.is_some(), "Login accepted");
            Ok(response)
        }
        Err(err) if err.is_unauthorized() => Err(ApiError::Http {
            status: 401,
            message: INVALID_CREDENTIALS.to_string(),
        }),
        Err(err) => Err(err),
    }
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => format!("{}{}.", first.to_uppercase(), chars.as_str()),
        None => String::new(),
    }
}
