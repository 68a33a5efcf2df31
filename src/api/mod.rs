//! HTTP helpers for JSON APIs with consistent timeouts and error handling. Feature
//! clients use these helpers to avoid duplicating request setup and to enforce a
//! predictable timeout policy. The client never logs bodies; a bearer token, when
//! attached, only leaves the process in the `Authorization` header.

pub mod config;
pub mod errors;

pub use config::{ApiConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT};
pub use errors::ApiError;

use reqwest::{header::AUTHORIZATION, Client, Method, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, info_span, Instrument};

/// Maximum number of error body characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;

/// Shared backend client. Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    config: ApiConfig,
    bearer: Option<SecretString>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .field("bearer", &self.bearer.as_ref().map(|_| "***"))
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Builds the underlying reqwest client with the configured user agent and timeout.
    ///
    /// # Errors
    /// Returns `ApiError::Config` if the HTTP client cannot be constructed.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let config = config.normalize();
        let http = Client::builder()
            .user_agent(config.user_agent())
            .timeout(config.timeout())
            .build()
            .map_err(|err| ApiError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            config,
            bearer: None,
        })
    }

    /// Returns a client that sends `Authorization: Bearer <token>` on every request.
    #[must_use]
    pub fn with_bearer(mut self, token: SecretString) -> Self {
        self.bearer = Some(token);
        self
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    #[must_use]
    pub fn has_bearer(&self) -> bool {
        self.bearer.is_some()
    }

    /// Fetches JSON.
    ///
    /// # Errors
    /// Returns an `ApiError` on network failure, timeout, non-2xx status, or an undecodable body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send::<()>(Method::GET, path, None).await?;
        handle_json_response(response).await
    }

    /// Posts JSON and parses a JSON response.
    ///
    /// # Errors
    /// Returns an `ApiError` on network failure, timeout, non-2xx status, or an undecodable body.
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.send(Method::POST, path, Some(body)).await?;
        handle_json_response(response).await
    }

    /// Posts an empty body to an endpoint that answers with plain text.
    ///
    /// # Errors
    /// Returns an `ApiError` on network failure, timeout, or non-2xx status.
    pub async fn post_text(&self, path: &str) -> Result<String, ApiError> {
        let response = self.send::<()>(Method::POST, path, None).await?;
        handle_text_response(response).await
    }

    /// Replaces a resource and parses the stored representation.
    ///
    /// # Errors
    /// Returns an `ApiError` on network failure, timeout, non-2xx status, or an undecodable body.
    pub async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.send(Method::PUT, path, Some(body)).await?;
        handle_json_response(response).await
    }

    /// Sends a bodyless PATCH and parses a JSON response.
    ///
    /// # Errors
    /// Returns an `ApiError` on network failure, timeout, non-2xx status, or an undecodable body.
    pub async fn patch_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send::<()>(Method::PATCH, path, None).await?;
        handle_json_response(response).await
    }

    /// Deletes a resource and ignores any response body.
    ///
    /// # Errors
    /// Returns an `ApiError` on network failure, timeout, or non-2xx status.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self.send::<()>(Method::DELETE, path, None).await?;
        handle_empty_response(response).await
    }

    async fn send<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response, ApiError> {
        let url = self.config.url_for(path);
        let span = info_span!(
            "api.request",
            http.method = %method,
            url = %url
        );

        let request = self.build_request(method, &url, body);
        let response = request.send().instrument(span).await.map_err(|err| {
            map_request_error(&err, self.config.timeout().as_secs())
        })?;

        debug!(status = %response.status(), url = %url, "api response");

        Ok(response)
    }

    fn build_request<B: Serialize>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> RequestBuilder {
        let mut builder = self.http.request(method, url);

        if let Some(token) = &self.bearer {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token.expose_secret()));
        }

        if let Some(body) = body {
            builder = builder.json(body);
        }

        builder
    }
}

/// Trims a caller-provided path value, rejects blanks before any request is made and
/// percent-encodes the rest so ids and search terms cannot alter the route.
///
/// # Errors
/// Returns `ApiError::Config` naming the field when the value is empty.
pub fn required_segment(value: &str, field: &str) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Config(format!("{field} is required.")));
    }
    Ok(urlencoding::encode(trimmed).into_owned())
}

/// Maps reqwest failures into user-facing `ApiError` variants with timeout detection.
fn map_request_error(err: &reqwest::Error, timeout_secs: u64) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout(format!("Request timed out after {timeout_secs}s."))
    } else if err.is_builder() {
        ApiError::Serialization(format!("Failed to build request: {err}"))
    } else {
        ApiError::Network(format!("Unable to reach the server: {err}"))
    }
}

/// Parses JSON responses and surfaces HTTP errors with sanitized bodies.
async fn handle_json_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if status.is_success() {
        response
            .json::<T>()
            .await
            .map_err(|err| ApiError::Parse(format!("Failed to decode response: {err}")))
    } else {
        Err(http_error(status, response).await)
    }
}

async fn handle_text_response(response: Response) -> Result<String, ApiError> {
    let status = response.status();
    if status.is_success() {
        response
            .text()
            .await
            .map(|body| body.trim().to_string())
            .map_err(|err| ApiError::Parse(format!("Failed to read response: {err}")))
    } else {
        Err(http_error(status, response).await)
    }
}

/// Handles responses whose body is irrelevant and returns sanitized HTTP errors when needed.
async fn handle_empty_response(response: Response) -> Result<(), ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(http_error(status, response).await)
    }
}

async fn http_error(status: StatusCode, response: Response) -> ApiError {
    let body = response.text().await.unwrap_or_default();
    ApiError::Http {
        status: status.as_u16(),
        message: error_message(&body),
    }
}

/// Prefers the backend's own message field; falls back to the raw (sanitized) body.
fn error_message(body: &str) -> String {
    let from_json = serde_json::from_str::<Value>(body).ok().and_then(|json| {
        ["message", "mensagemErro", "error"]
            .iter()
            .find_map(|key| json.get(key).and_then(Value::as_str).map(str::to_string))
    });

    sanitize_body(from_json.as_deref().unwrap_or(body))
}

/// Sanitizes HTTP error bodies for user-facing messages by trimming and truncating.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use std::net::TcpListener;
    use std::time::Duration;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Pong {
        ok: bool,
    }

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(ApiConfig::new(&server.uri()).unwrap()).unwrap()
    }

    #[test]
    fn required_segment_escapes_reserved_characters() {
        assert_eq!(required_segment("42", "Id").unwrap(), "42");
        assert_eq!(required_segment(" Sao Paulo ", "City").unwrap(), "Sao%20Paulo");
        assert_eq!(required_segment("a/b?c", "Name").unwrap(), "a%2Fb%3Fc");
        assert_eq!(required_segment("São", "City").unwrap(), "S%C3%A3o");
    }

    #[test]
    fn required_segment_rejects_blank() {
        assert!(matches!(
            required_segment("   ", "User id"),
            Err(ApiError::Config(message)) if message == "User id is required."
        ));
        assert_eq!(required_segment(" 7 ", "User id").unwrap(), "7");
    }

    #[test]
    fn error_message_prefers_json_fields() {
        assert_eq!(error_message(r#"{"message":"Email not found"}"#), "Email not found");
        assert_eq!(
            error_message(r#"{"mensagemErro":"CPF invalido"}"#),
            "CPF invalido"
        );
        assert_eq!(error_message("  plain failure  "), "plain failure");
        assert_eq!(error_message(""), "Request failed.");
    }

    #[test]
    fn sanitize_body_truncates_long_bodies() {
        let body = "x".repeat(500);
        assert_eq!(sanitize_body(&body).len(), MAX_ERROR_CHARS);
    }

    #[tokio::test]
    async fn post_json_sends_body_and_bearer() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/ping"))
            .and(header("Authorization", "Bearer session-token"))
            .and(body_json(json!({"hello": "world"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).with_bearer(SecretString::from("session-token".to_string()));
        let pong: Pong = client
            .post_json("/ping", &json!({"hello": "world"}))
            .await
            .unwrap();
        assert_eq!(pong, Pong { ok: true });
    }

    #[tokio::test]
    async fn non_success_status_maps_to_http_error() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"message": "Not here"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .get_json::<Pong>("/missing")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Http {
                status: 404,
                message: "Not here".to_string()
            }
        );
    }

    #[tokio::test]
    async fn undecodable_body_maps_to_parse_error() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/garbage"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .get_json::<Pong>("/garbage")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));
    }

    #[tokio::test]
    async fn slow_response_maps_to_timeout() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"ok": true}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let config = ApiConfig::new(&server.uri())
            .unwrap()
            .with_timeout(Duration::from_millis(200));
        let err = ApiClient::new(config)
            .unwrap()
            .get_json::<Pong>("/slow")
            .await
            .unwrap_err();
        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn delete_ignores_body() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/usuario/3"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server).delete("/usuario/3").await.unwrap();
    }

    #[test]
    fn debug_hides_bearer() {
        let client = ApiClient::new(ApiConfig::new("http://localhost:8082").unwrap())
            .unwrap()
            .with_bearer(SecretString::from("top-secret".to_string()));
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("top-secret"));
        assert!(client.has_bearer());
    }
}
