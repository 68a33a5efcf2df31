//! Client helpers for customer endpoints. The CPF and birth date are checked
//! locally before anything is sent; the backend still has the final word and
//! reports its verdict in the response body.

use super::types::{normalize_cpf, validate_birth_date, Client, ClientPayload};
use crate::api::{required_segment, ApiClient, ApiError};
use serde::{Serialize, Serializer};
use tracing::{instrument, warn};

/// Fetches every client.
///
/// # Errors
/// Propagates any `ApiError` from the request.
#[instrument(skip(api))]
pub async fn list_clients(api: &ApiClient) -> Result<Vec<Client>, ApiError> {
    api.get_json("/cliente").await
}

/// # Errors
/// Propagates any `ApiError` from the request; a missing client is an HTTP 404.
#[instrument(skip(api))]
pub async fn get_client(api: &ApiClient, id: i64) -> Result<Client, ApiError> {
    api.get_json(&format!("/cliente/{id}")).await
}

/// Searches clients by the name of their user account.
///
/// # Errors
/// Returns `ApiError::Config` for a blank name, otherwise any request error.
#[instrument(skip(api))]
pub async fn search_clients(api: &ApiClient, name: &str) -> Result<Vec<Client>, ApiError> {
    let name = required_segment(name, "Name")?;
    api.get_json(&format!("/cliente/buscar/{name}")).await
}

/// Registers a client and its user account in one call.
///
/// # Errors
/// Returns `ApiError::Config` for local field problems, `ApiError::Rejected`
/// when the backend answers with `valid: false`, otherwise any request error.
#[instrument(skip(api, payload))]
pub async fn create_client(api: &ApiClient, payload: &ClientPayload) -> Result<Client, ApiError> {
    if payload.user.password.is_none() {
        return Err(ApiError::Config("Password is required.".to_string()));
    }
    let payload = prepared(payload)?;
    let client: Client = api.post_json("/cliente", &payload).await?;
    accepted(client)
}

/// Replaces a client's data.
///
/// # Errors
/// Same as [`create_client`], minus the password requirement.
#[instrument(skip(api, payload))]
pub async fn update_client(
    api: &ApiClient,
    id: i64,
    payload: &ClientPayload,
) -> Result<Client, ApiError> {
    let payload = prepared(payload)?;
    let client: Client = api.put_json(&format!("/cliente/{id}"), &payload).await?;
    accepted(client)
}

/// Marks a client inactive without deleting it.
///
/// # Errors
/// Propagates any `ApiError` from the request.
#[instrument(skip(api))]
pub async fn deactivate_client(api: &ApiClient, id: i64) -> Result<Client, ApiError> {
    api.patch_empty(&format!("/cliente/{id}/inativar")).await
}

/// # Errors
/// Propagates any `ApiError` from the request.
#[instrument(skip(api))]
pub async fn delete_client(api: &ApiClient, id: i64) -> Result<(), ApiError> {
    api.delete(&format!("/cliente/{id}")).await
}

fn prepared(payload: &ClientPayload) -> Result<PreparedClient<'_>, ApiError> {
    let cpf = normalize_cpf(&payload.cpf).map_err(|err| ApiError::Config(err.to_string()))?;
    let birth_date = validate_birth_date(&payload.birth_date)
        .map_err(|err| ApiError::Config(err.to_string()))?;
    Ok(PreparedClient {
        cpf,
        birth_date,
        payload,
    })
}

fn accepted(client: Client) -> Result<Client, ApiError> {
    match client.rejection() {
        Some(message) => {
            warn!(reason = %message, "Backend rejected client record");
            Err(ApiError::Rejected(message.to_string()))
        }
        None => Ok(client),
    }
}

/// Payload with the CPF and birth date replaced by their cleaned forms.
struct PreparedClient<'a> {
    cpf: String,
    birth_date: String,
    payload: &'a ClientPayload,
}

impl Serialize for PreparedClient<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ClientPayload::wire(&self.cpf, &self.birth_date, self.payload).serialize(serializer)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::api::ApiConfig;
    use crate::features::users::UserPayload;
    use secrecy::SecretString;
    use serde_json::json;
    use std::net::TcpListener;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn api_for(server: &MockServer) -> ApiClient {
        ApiClient::new(ApiConfig::new(&server.uri()).unwrap()).unwrap()
    }

    fn offline_api() -> ApiClient {
        ApiClient::new(ApiConfig::new("http://127.0.0.1:9").unwrap()).unwrap()
    }

    fn payload(cpf: &str) -> ClientPayload {
        ClientPayload {
            cpf: cpf.to_string(),
            birth_date: "1990-01-01".to_string(),
            user: UserPayload {
                name: "Joao".to_string(),
                email: "joao@example.com".to_string(),
                password: Some(SecretString::from("secret1".to_string())),
                access_level: None,
            },
            status: None,
        }
    }

    #[tokio::test]
    async fn create_sends_cleaned_cpf() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/cliente"))
            .and(body_json(json!({
                "cpf": "11144477735",
                "dataNascimento": "1990-01-01",
                "usuario": {"nome": "Joao", "email": "joao@example.com", "senha": "secret1"}
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 4,
                "cpf": "11144477735",
                "dataNascimento": "1990-01-01",
                "statusCliente": "ATIVO",
                "valid": true,
                "mensagemErro": ""
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = create_client(&api_for(&server), &payload("111.444.777-35"))
            .await
            .unwrap();
        assert_eq!(client.id, Some(4));
        assert_eq!(client.status.as_deref(), Some("ATIVO"));
    }

    #[tokio::test]
    async fn create_surfaces_backend_rejection() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/cliente"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "cpf": "11144477735",
                "dataNascimento": "1990-01-01",
                "valid": false,
                "mensagemErro": "CPF ja cadastrado"
            })))
            .mount(&server)
            .await;

        let err = create_client(&api_for(&server), &payload("11144477735"))
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::Rejected("CPF ja cadastrado".to_string()));
    }

    #[tokio::test]
    async fn invalid_cpf_never_reaches_backend() {
        let err = create_client(&offline_api(), &payload("123.456.789-00"))
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::Config("CPF is invalid".to_string()));

        let mut bad_date = payload("11144477735");
        bad_date.birth_date = "01/01/1990".to_string();
        let err = update_client(&offline_api(), 1, &bad_date).await.unwrap_err();
        assert_eq!(err, ApiError::Config("birth date must be YYYY-MM-DD".to_string()));
    }

    #[tokio::test]
    async fn deactivate_patches_client() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/cliente/4/inativar"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 4,
                "cpf": "11144477735",
                "dataNascimento": "1990-01-01",
                "statusCliente": "INATIVO"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = deactivate_client(&api_for(&server), 4).await.unwrap();
        assert_eq!(client.status.as_deref(), Some("INATIVO"));
    }

    #[tokio::test]
    async fn search_encodes_name() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/cliente/buscar/Jo%C3%A3o"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let found = search_clients(&api_for(&server), "João").await.unwrap();
        assert!(found.is_empty());
    }
}
