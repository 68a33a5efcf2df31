use crate::api::ApiError;
use secrecy::SecretString;
use std::future::Future;

/// Outcome of asking the backend for a reset code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodeRequestReceipt {
    pub accepted: bool,
}

/// The three backend operations the reset flow depends on.
///
/// `Err` means the call itself failed (network, timeout, HTTP status); an
/// explicit refusal by the backend is `Ok(false)` / `accepted: false`.
pub trait ResetService: Send + Sync {
    fn generate_reset_code(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<CodeRequestReceipt, ApiError>> + Send;

    fn verify_reset_code(
        &self,
        email: &str,
        code: &str,
    ) -> impl Future<Output = Result<bool, ApiError>> + Send;

    fn reset_password(
        &self,
        email: &str,
        token: &SecretString,
        new_password: &SecretString,
    ) -> impl Future<Output = Result<bool, ApiError>> + Send;
}
