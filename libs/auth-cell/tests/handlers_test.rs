// libs/auth-cell/tests/handlers_test.rs

use std::sync::Arc;

use assert_matches::assert_matches;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, HeaderValue};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use auth_cell::handlers::{login, register, validate, verify};
use auth_cell::models::{LoginRequest, RegisterRequest};
use shared_config::AppConfig;
use shared_models::error::AppError;
use shared_utils::test_utils::{TestConfig, TestUser};

fn state_for(mock_server: &MockServer) -> State<Arc<AppConfig>> {
    State(TestConfig::with_backend_url(&mock_server.uri()).to_arc())
}

fn default_state() -> State<Arc<AppConfig>> {
    State(TestConfig::default().to_arc())
}

fn bearer_headers(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        "Authorization",
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    );
    headers
}

fn patient_registration() -> RegisterRequest {
    RegisterRequest {
        email: "pat@example.com".to_string(),
        password: "hunter22".to_string(),
        user_type: "patient".to_string(),
        name: "Pat Doe".to_string(),
        specialization: None,
        phone: None,
        bio: None,
    }
}

#[tokio::test]
async fn register_forwards_valid_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/register"))
        .and(body_partial_json(json!({
            "email": "pat@example.com",
            "userType": "patient"
        })))
        .respond_with(ResponseTemplate::new(201)
            .set_body_json(json!({ "message": "Registration successful." })))
        .mount(&mock_server)
        .await;

    let result = register(state_for(&mock_server), Json(patient_registration())).await;

    let body = result.expect("registration should succeed").0;
    assert_eq!(body["message"], "Registration successful.");
}

#[tokio::test]
async fn register_rejects_missing_fields() {
    let mock_server = MockServer::start().await;

    let mut request = patient_registration();
    request.email = String::new();

    let result = register(state_for(&mock_server), Json(request)).await;
    assert_matches!(result, Err(AppError::BadRequest(_)));
}

#[tokio::test]
async fn register_rejects_unknown_user_type() {
    let mock_server = MockServer::start().await;

    let mut request = patient_registration();
    request.user_type = "admin".to_string();

    let result = register(state_for(&mock_server), Json(request)).await;
    assert_matches!(result, Err(AppError::BadRequest(_)));
}

#[tokio::test]
async fn register_requires_specialization_for_doctors() {
    let mock_server = MockServer::start().await;

    let mut request = patient_registration();
    request.user_type = "doctor".to_string();

    let result = register(state_for(&mock_server), Json(request)).await;
    assert_matches!(result, Err(AppError::BadRequest(_)));
}

#[tokio::test]
async fn register_surfaces_backend_conflicts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/register"))
        .respond_with(ResponseTemplate::new(409)
            .set_body_json(json!({ "error": "Email already registered." })))
        .mount(&mock_server)
        .await;

    let result = register(state_for(&mock_server), Json(patient_registration())).await;
    assert_matches!(result, Err(AppError::Conflict(_)));
}

#[tokio::test]
async fn login_returns_backend_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Login successful.",
            "token": "signed.jwt.token",
            "userType": "patient"
        })))
        .mount(&mock_server)
        .await;

    let result = login(
        state_for(&mock_server),
        Json(LoginRequest {
            email: "pat@example.com".to_string(),
            password: "hunter22".to_string(),
            user_type: "patient".to_string(),
        }),
    ).await;

    let response = result.expect("login should succeed").0;
    assert_eq!(response.token, "signed.jwt.token");
    assert_eq!(response.user_type, "patient");
    assert!(response.doctor_id.is_none());
}

#[tokio::test]
async fn login_maps_bad_credentials_to_auth_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(401)
            .set_body_json(json!({ "error": "Invalid email or password." })))
        .mount(&mock_server)
        .await;

    let result = login(
        state_for(&mock_server),
        Json(LoginRequest {
            email: "pat@example.com".to_string(),
            password: "wrong".to_string(),
            user_type: "patient".to_string(),
        }),
    ).await;

    assert_matches!(result, Err(AppError::Auth(_)));
}

#[tokio::test]
async fn validate_accepts_a_locally_signed_token() {
    let State(config) = default_state();
    let user = TestUser::doctor();
    let token = user.to_token(&config.jwt_secret);

    let result = validate(State(config), bearer_headers(&token)).await;

    let response = result.expect("validation should succeed").0;
    assert!(response.valid);
    assert_eq!(response.user_id, user.id);
    assert_eq!(response.user_type.as_deref(), Some("doctor"));
}

#[tokio::test]
async fn validate_rejects_a_tampered_token() {
    let State(config) = default_state();
    let token = TestUser::patient().to_token("some-other-secret-entirely");

    let result = validate(State(config), bearer_headers(&token)).await;
    assert_matches!(result, Err(AppError::Auth(_)));
}

#[tokio::test]
async fn validate_requires_a_bearer_header() {
    let result = validate(default_state(), HeaderMap::new()).await;
    assert_matches!(result, Err(AppError::Auth(_)));
}

#[tokio::test]
async fn verify_reports_validity_without_erroring() {
    let State(config) = default_state();
    let token = TestUser::patient().to_token(&config.jwt_secret);

    let good = verify(State(config.clone()), bearer_headers(&token)).await;
    assert_eq!(good.expect("verify should not error").0["valid"], true);

    let bad = verify(State(config), bearer_headers("not.a.jwt")).await;
    assert_eq!(bad.expect("verify should not error").0["valid"], false);
}
