//! Integration tests for the Keystone HTTP client

use keystone_client::client::auth::{LOGIN_PATH, REFRESH_PATH, REGISTER_PATH};
use keystone_client::error::ClientError;
use keystone_client::types::{LoginRequest, RegisterRequest};
use keystone_client::KeystoneClient;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_client_builder() {
    let client = KeystoneClient::builder()
        .base_url("http://localhost:8080/")
        .build();

    assert!(client.is_ok());
    let client = client.unwrap();
    assert_eq!(client.base_url(), "http://localhost:8080");
}

#[tokio::test]
async fn test_client_builder_requires_base_url() {
    let result = KeystoneClient::builder().build();
    assert!(matches!(result, Err(ClientError::Configuration(_))));
}

#[tokio::test]
async fn test_login_endpoint() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .and(body_json(json!({
            "email": "user@example.com",
            "password": "hunter2"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "A1",
            "refreshToken": "R1"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = KeystoneClient::new(mock_server.uri()).unwrap();
    let tokens = client
        .login(LoginRequest {
            email: "user@example.com".to_string(),
            password: "hunter2".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(tokens.access_token, "A1");
    assert_eq!(tokens.refresh_token, "R1");
}

#[tokio::test]
async fn test_register_endpoint() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(REGISTER_PATH))
        .and(body_json(json!({
            "name": "Test User",
            "email": "new@example.com",
            "password": "hunter2"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "A1",
            "refreshToken": "R1"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = KeystoneClient::new(mock_server.uri()).unwrap();
    let tokens = client
        .register(RegisterRequest {
            name: "Test User".to_string(),
            email: "new@example.com".to_string(),
            password: "hunter2".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(tokens.access_token, "A1");
}

#[tokio::test]
async fn test_refresh_endpoint_sends_camel_case_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(REFRESH_PATH))
        .and(body_json(json!({ "refreshToken": "R1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "A2",
            "refreshToken": "R2"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = KeystoneClient::new(mock_server.uri()).unwrap();
    let tokens = client.refresh("R1").await.unwrap();

    assert_eq!(tokens.access_token, "A2");
    assert_eq!(tokens.refresh_token, "R2");
}

#[tokio::test]
async fn test_unauthorized_surfaces_backend_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Invalid email or password",
            "code": "INVALID_CREDENTIALS"
        })))
        .mount(&mock_server)
        .await;

    let client = KeystoneClient::new(mock_server.uri()).unwrap();
    let result = client
        .login(LoginRequest {
            email: "user@example.com".to_string(),
            password: "wrong".to_string(),
        })
        .await;

    match result {
        Err(ClientError::AuthenticationFailed(message)) => {
            assert_eq!(message, "Invalid email or password");
        }
        other => panic!("Expected authentication failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_keeps_status_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(REFRESH_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let client = KeystoneClient::new(mock_server.uri()).unwrap();
    let result = client.refresh("R1").await;

    match result {
        Err(ClientError::ServerError { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("Expected server error, got {other:?}"),
    }
}
