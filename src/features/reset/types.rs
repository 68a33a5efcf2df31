//! Request and response payloads for the password reset endpoints. Requests
//! borrow their fields and carry passwords and codes, so they must never be
//! logged; their `Debug` output is redacted.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize)]
pub struct GenerateCodeRequest<'a> {
    pub email: &'a str,
}

/// Answer to a code request. The backend may echo the generated code next to
/// `success`; it is deliberately not modelled so it is never deserialized.
#[derive(Clone, Debug, Deserialize)]
pub struct GenerateCodeResponse {
    #[serde(default)]
    pub success: bool,
}

#[derive(Clone, Serialize)]
pub struct VerifyCodeRequest<'a> {
    pub email: &'a str,
    pub token: &'a str,
}

#[derive(Clone, Serialize)]
pub struct ResetPasswordRequest<'a> {
    pub email: &'a str,
    pub token: &'a str,
    #[serde(rename = "newPassword")]
    pub new_password: &'a str,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SuccessResponse {
    #[serde(default)]
    pub success: bool,
}

impl std::fmt::Debug for VerifyCodeRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerifyCodeRequest")
            .field("email", &self.email)
            .field("token", &"***")
            .finish()
    }
}

impl std::fmt::Debug for ResetPasswordRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResetPasswordRequest")
            .field("email", &self.email)
            .field("token", &"***")
            .field("new_password", &"***")
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reset_request_uses_backend_field_names() {
        let request = ResetPasswordRequest {
            email: "user@example.com",
            token: "123456",
            new_password: "secret1",
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"email": "user@example.com", "token": "123456", "newPassword": "secret1"})
        );
    }

    #[test]
    fn generate_response_ignores_echoed_code() {
        let response: GenerateCodeResponse =
            serde_json::from_value(json!({"success": true, "token": "654321"})).unwrap();
        assert!(response.success);
    }

    #[test]
    fn missing_success_defaults_to_false() {
        let response: SuccessResponse = serde_json::from_value(json!({})).unwrap();
        assert!(!response.success);
    }

    #[test]
    fn debug_output_is_redacted() {
        let request = ResetPasswordRequest {
            email: "user@example.com",
            token: "123456",
            new_password: "secret1",
        };
        let rendered = format!("{request:?}");
        assert!(!rendered.contains("123456"));
        assert!(!rendered.contains("secret1"));
    }
}
