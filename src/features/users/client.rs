//! Client helpers for user endpoints. These functions keep endpoint paths
//! centralized and assume the backend enforces authorization.

use super::types::{User, UserPayload};
use crate::api::{required_segment, ApiClient, ApiError};
use tracing::instrument;

/// Fetches the user list.
///
/// # Errors
/// Propagates any `ApiError` from the request.
#[instrument(skip(api))]
pub async fn list_users(api: &ApiClient) -> Result<Vec<User>, ApiError> {
    api.get_json("/usuario").await
}

/// Fetches a single user by id.
///
/// # Errors
/// Propagates any `ApiError` from the request; a missing user is an HTTP 404.
#[instrument(skip(api))]
pub async fn get_user(api: &ApiClient, id: i64) -> Result<User, ApiError> {
    api.get_json(&format!("/usuario/{id}")).await
}

/// Searches users whose name contains `name`.
///
/// # Errors
/// Returns `ApiError::Config` for a blank name, otherwise any request error.
#[instrument(skip(api))]
pub async fn search_users(api: &ApiClient, name: &str) -> Result<Vec<User>, ApiError> {
    let name = required_segment(name, "Name")?;
    api.get_json(&format!("/usuario/buscar/{name}")).await
}

/// Creates a user. A password is mandatory for new accounts.
///
/// # Errors
/// Returns `ApiError::Config` when the password is missing, otherwise any request error.
#[instrument(skip(api, payload))]
pub async fn create_user(api: &ApiClient, payload: &UserPayload) -> Result<User, ApiError> {
    if payload.password.is_none() {
        return Err(ApiError::Config("Password is required.".to_string()));
    }
    api.post_json("/usuario", payload).await
}

/// Replaces a user's data.
///
/// # Errors
/// Propagates any `ApiError` from the request.
#[instrument(skip(api, payload))]
pub async fn update_user(api: &ApiClient, id: i64, payload: &UserPayload) -> Result<User, ApiError> {
    api.put_json(&format!("/usuario/{id}"), payload).await
}

/// Deletes a user.
///
/// # Errors
/// Propagates any `ApiError` from the request.
#[instrument(skip(api))]
pub async fn delete_user(api: &ApiClient, id: i64) -> Result<(), ApiError> {
    api.delete(&format!("/usuario/{id}")).await
}
