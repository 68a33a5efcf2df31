//! Specialty endpoints under `/especialidade`.

use super::types::{Specialty, Verdict};
use crate::api::{required_segment, ApiClient, ApiError};
use tracing::{info, instrument};

/// # Errors
/// Propagates any `ApiError` from the request.
#[instrument(skip(api))]
pub async fn list_specialties(api: &ApiClient) -> Result<Vec<Specialty>, ApiError> {
    api.get_json("/especialidade").await
}

/// Specialties currently offered to technicians.
///
/// # Errors
/// Propagates any `ApiError` from the request.
#[instrument(skip(api))]
pub async fn list_active_specialties(api: &ApiClient) -> Result<Vec<Specialty>, ApiError> {
    api.get_json("/especialidade/ativas").await
}

/// # Errors
/// Propagates any `ApiError` from the request; a missing specialty is an HTTP 404.
#[instrument(skip(api))]
pub async fn get_specialty(api: &ApiClient, id: i64) -> Result<Specialty, ApiError> {
    api.get_json(&format!("/especialidade/{id}")).await
}

/// # Errors
/// Returns `ApiError::Config` for a blank name, otherwise any request error.
#[instrument(skip(api))]
pub async fn find_specialty_by_name(api: &ApiClient, name: &str) -> Result<Specialty, ApiError> {
    let name = required_segment(name, "Name")?;
    api.get_json(&format!("/especialidade/nome/{name}")).await
}

/// # Errors
/// Returns `ApiError::Rejected` when the backend flags the record invalid.
#[instrument(skip(api))]
pub async fn create_specialty(api: &ApiClient, specialty: &Specialty) -> Result<Specialty, ApiError> {
    if specialty.name.trim().is_empty() {
        return Err(ApiError::Config("Name is required.".to_string()));
    }
    let created: Specialty = api.post_json("/especialidade", specialty).await?;
    accepted(created)
}

/// # Errors
/// Returns `ApiError::Rejected` when the backend flags the record invalid.
#[instrument(skip(api))]
pub async fn update_specialty(
    api: &ApiClient,
    id: i64,
    specialty: &Specialty,
) -> Result<Specialty, ApiError> {
    let updated: Specialty = api
        .put_json(&format!("/especialidade/{id}"), specialty)
        .await?;
    accepted(updated)
}

/// # Errors
/// Propagates any `ApiError` from the request.
#[instrument(skip(api))]
pub async fn delete_specialty(api: &ApiClient, id: i64) -> Result<(), ApiError> {
    api.delete(&format!("/especialidade/{id}")).await
}

/// Seeds the default specialty list; existing names are left alone.
///
/// # Errors
/// Propagates any `ApiError` from the request.
#[instrument(skip(api))]
pub async fn initialize_specialties(api: &ApiClient) -> Result<String, ApiError> {
    let message = api.post_text("/especialidade/initialize").await?;
    info!(%message, "Default specialties initialized");
    Ok(message)
}

fn accepted(specialty: Specialty) -> Result<Specialty, ApiError> {
    match specialty.verdict() {
        Some(message) => Err(ApiError::Rejected(message)),
        None => Ok(specialty),
    }
}
