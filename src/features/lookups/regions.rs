//! Region endpoints under `/regiao`.

use super::types::{Region, Verdict};
use crate::api::{required_segment, ApiClient, ApiError};
use tracing::{info, instrument};

/// # Errors
/// Propagates any `ApiError` from the request.
#[instrument(skip(api))]
pub async fn list_regions(api: &ApiClient) -> Result<Vec<Region>, ApiError> {
    api.get_json("/regiao").await
}

/// # Errors
/// Propagates any `ApiError` from the request.
#[instrument(skip(api))]
pub async fn list_active_regions(api: &ApiClient) -> Result<Vec<Region>, ApiError> {
    api.get_json("/regiao/ativas").await
}

/// # Errors
/// Propagates any `ApiError` from the request; a missing region is an HTTP 404.
#[instrument(skip(api))]
pub async fn get_region(api: &ApiClient, id: i64) -> Result<Region, ApiError> {
    api.get_json(&format!("/regiao/{id}")).await
}

/// # Errors
/// Returns `ApiError::Config` for a blank name, otherwise any request error.
#[instrument(skip(api))]
pub async fn find_region_by_name(api: &ApiClient, name: &str) -> Result<Region, ApiError> {
    let name = required_segment(name, "Name")?;
    api.get_json(&format!("/regiao/nome/{name}")).await
}

/// Regions that serve a given city.
///
/// # Errors
/// Returns `ApiError::Config` for a blank city, otherwise any request error.
#[instrument(skip(api))]
pub async fn regions_by_city(api: &ApiClient, city: &str) -> Result<Vec<Region>, ApiError> {
    let city = required_segment(city, "City")?;
    api.get_json(&format!("/regiao/cidade/{city}")).await
}

/// # Errors
/// Returns `ApiError::Rejected` when the backend flags the record invalid.
#[instrument(skip(api))]
pub async fn create_region(api: &ApiClient, region: &Region) -> Result<Region, ApiError> {
    if region.name.trim().is_empty() {
        return Err(ApiError::Config("Name is required.".to_string()));
    }
    if region.city.trim().is_empty() {
        return Err(ApiError::Config("City is required.".to_string()));
    }
    let created: Region = api.post_json("/regiao", region).await?;
    accepted(created)
}

/// # Errors
/// Returns `ApiError::Rejected` when the backend flags the record invalid.
#[instrument(skip(api))]
pub async fn update_region(api: &ApiClient, id: i64, region: &Region) -> Result<Region, ApiError> {
    let updated: Region = api.put_json(&format!("/regiao/{id}"), region).await?;
    accepted(updated)
}

/// # Errors
/// Propagates any `ApiError` from the request.
#[instrument(skip(api))]
pub async fn delete_region(api: &ApiClient, id: i64) -> Result<(), ApiError> {
    api.delete(&format!("/regiao/{id}")).await
}

/// Seeds the default regions; existing names are left alone.
///
/// # Errors
/// Propagates any `ApiError` from the request.
#[instrument(skip(api))]
pub async fn initialize_regions(api: &ApiClient) -> Result<String, ApiError> {
    let message = api.post_text("/regiao/initialize").await?;
    info!(%message, "Default regions initialized");
    Ok(message)
}

fn accepted(region: Region) -> Result<Region, ApiError> {
    match region.verdict() {
        Some(message) => Err(ApiError::Rejected(message)),
        None => Ok(region),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::api::ApiConfig;
    use serde_json::json;
    use std::net::TcpListener;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn api_for(server: &MockServer) -> ApiClient {
        ApiClient::new(ApiConfig::new(&server.uri()).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn regions_by_city_encodes_city() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/regiao/cidade/S%C3%A3o%20Paulo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "cidade": "São Paulo", "nome": "Norte", "statusRegiao": "ATIVO"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let regions = regions_by_city(&api_for(&server), "São Paulo").await.unwrap();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].name, "Norte");
    }

    #[tokio::test]
    async fn blank_city_is_rejected_locally() {
        let api = ApiClient::new(ApiConfig::new("http://127.0.0.1:9").unwrap()).unwrap();
        assert_eq!(
            regions_by_city(&api, " ").await.unwrap_err(),
            ApiError::Config("City is required.".to_string())
        );
        assert_eq!(
            create_region(&api, &Region::new("", "Norte", None))
                .await
                .unwrap_err(),
            ApiError::Config("City is required.".to_string())
        );
    }

    #[tokio::test]
    async fn initialize_failure_is_http_error() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/regiao/initialize"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Erro ao inicializar regiões"))
            .mount(&server)
            .await;

        let err = initialize_regions(&api_for(&server)).await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Http {
                status: 500,
                message: "Erro ao inicializar regiões".to_string()
            }
        );
    }
}
