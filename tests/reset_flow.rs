#![allow(clippy::unwrap_used)]

use resetflow::api::{ApiClient, ApiConfig, ApiError};
use resetflow::features::reset::{
    HttpResetService, Phase, Rejection, ResetError, ResetFlow, StepOutcome,
};
use secrecy::SecretString;
use serde_json::json;
use std::net::TcpListener;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

fn secret(value: &str) -> SecretString {
    SecretString::from(value.to_string())
}

fn flow_for(server: &MockServer) -> ResetFlow<HttpResetService> {
    let api = ApiClient::new(ApiConfig::new(&server.uri()).unwrap()).unwrap();
    ResetFlow::new(HttpResetService::new(api))
}

#[tokio::test]
async fn full_reset_against_backend() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;

    // the backend echoes the code; the client must not pick it up
    Mock::given(method("POST"))
        .and(path("/password-reset/generate"))
        .and(body_json(json!({"email": "user@example.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "token": "999999",
            "message": "Token gerado"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/password-reset/verify"))
        .and(body_json(json!({"email": "user@example.com", "token": "123456"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/password-reset/reset"))
        .and(body_json(json!({
            "email": "user@example.com",
            "token": "123456",
            "newPassword": "secret1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let flow = flow_for(&server);
    let mut visited = vec![flow.phase()];

    let outcome = flow.request_code("user@example.com").await.unwrap();
    assert_eq!(outcome, StepOutcome::Advanced(Phase::VerifyCode));
    assert!(!flow.has_verification_token());
    visited.push(flow.phase());

    flow.verify_code("123456").await.unwrap();
    visited.push(flow.phase());

    flow.set_new_password(secret("secret1"), secret("secret1"))
        .await
        .unwrap();
    visited.push(flow.phase());

    assert_eq!(
        visited,
        [
            Phase::RequestCode,
            Phase::VerifyCode,
            Phase::SetPassword,
            Phase::Complete
        ]
    );
    assert!(flow.progress().iter().all(|step| step.active));
    assert!(flow.last_error().is_none());
}

#[tokio::test]
async fn refused_code_keeps_verify_phase() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/password-reset/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/password-reset/verify"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .expect(1)
        .mount(&server)
        .await;

    let flow = flow_for(&server);
    flow.request_code("user@example.com").await.unwrap();

    let err = flow.verify_code("654321").await.unwrap_err();
    assert_eq!(err, ResetError::Rejected(Rejection::Code));
    assert_eq!(flow.phase(), Phase::VerifyCode);
    assert_eq!(flow.last_error().as_deref(), Some("invalid or expired"));
    assert!(!flow.is_busy());
}

#[tokio::test]
async fn slow_backend_times_out() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/password-reset/generate"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let flow = flow_for(&server).with_timeout(Duration::from_millis(200));
    let err = flow.request_code("user@example.com").await.unwrap_err();

    assert!(matches!(err, ResetError::Service(ApiError::Timeout(_))));
    assert_eq!(flow.phase(), Phase::RequestCode);
    assert!(!flow.is_busy());
}

#[tokio::test]
async fn server_error_surfaces_backend_message() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/password-reset/generate"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"message": "Email nao encontrado"})),
        )
        .mount(&server)
        .await;

    let flow = flow_for(&server);
    let err = flow.request_code("user@example.com").await.unwrap_err();

    assert_eq!(
        err,
        ResetError::Service(ApiError::Http {
            status: 500,
            message: "Email nao encontrado".to_string()
        })
    );
    assert_eq!(flow.phase(), Phase::RequestCode);
}
