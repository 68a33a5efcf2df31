//! HTTP binding of `ResetService` against the backend's `/password-reset` routes.

use super::{
    service::{CodeRequestReceipt, ResetService},
    types::{
        GenerateCodeRequest, GenerateCodeResponse, ResetPasswordRequest, SuccessResponse,
        VerifyCodeRequest,
    },
};
use crate::api::{ApiClient, ApiError};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

pub const GENERATE_PATH: &str = "/password-reset/generate";
pub const VERIFY_PATH: &str = "/password-reset/verify";
pub const RESET_PATH: &str = "/password-reset/reset";

#[derive(Clone, Debug)]
pub struct HttpResetService {
    api: ApiClient,
}

impl HttpResetService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

impl ResetService for HttpResetService {
    /// Asks the backend to send a code. Any code echoed in the response is dropped.
    #[instrument(skip_all)]
    async fn generate_reset_code(&self, email: &str) -> Result<CodeRequestReceipt, ApiError> {
        let response: GenerateCodeResponse = self
            .api
            .post_json(GENERATE_PATH, &GenerateCodeRequest { email })
            .await?;

        debug!(accepted = response.success, "reset code requested");

        Ok(CodeRequestReceipt {
            accepted: response.success,
        })
    }

    #[instrument(skip_all)]
    async fn verify_reset_code(&self, email: &str, code: &str) -> Result<bool, ApiError> {
        let response: SuccessResponse = self
            .api
            .post_json(VERIFY_PATH, &VerifyCodeRequest { email, token: code })
            .await?;

        debug!(verified = response.success, "reset code verified");

        Ok(response.success)
    }

    #[instrument(skip_all)]
    async fn reset_password(
        &self,
        email: &str,
        token: &SecretString,
        new_password: &SecretString,
    ) -> Result<bool, ApiError> {
        let request = ResetPasswordRequest {
            email,
            token: token.expose_secret(),
            new_password: new_password.expose_secret(),
        };
        let response: SuccessResponse = self.api.post_json(RESET_PATH, &request).await?;

        debug!(reset = response.success, "password reset submitted");

        Ok(response.success)
    }
}
