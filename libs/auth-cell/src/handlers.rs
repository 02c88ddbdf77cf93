// libs/auth-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::HeaderMap,
};
use reqwest::Method;
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_database::backend::BackendClient;
use shared_models::auth::TokenResponse;
use shared_models::error::AppError;
use shared_utils::jwt::validate_token;

use crate::models::{LoginRequest, LoginResponse, RegisterRequest};

// Helper function to extract token
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, AppError> {
    let auth_header = headers
        .get("Authorization")
        .ok_or_else(|| AppError::Auth("Missing authorization header".to_string()))?;

    let auth_value = auth_header
        .to_str()
        .map_err(|_| AppError::Auth("Invalid authorization header format".to_string()))?;

    if !auth_value.starts_with("Bearer ") {
        return Err(AppError::Auth("Invalid authorization header format".to_string()));
    }

    Ok(auth_value[7..].to_string())
}

pub async fn register(
    State(config): State<Arc<AppConfig>>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<Value>, AppError> {
    debug!("Registering new {} account", request.user_type);

    if request.email.is_empty() || request.password.is_empty() || request.name.is_empty() {
        return Err(AppError::BadRequest("Missing required fields".to_string()));
    }

    if request.user_type != "patient" && request.user_type != "doctor" {
        return Err(AppError::BadRequest("Invalid user type".to_string()));
    }

    if request.user_type == "doctor"
        && request.specialization.as_deref().unwrap_or("").is_empty()
    {
        return Err(AppError::BadRequest(
            "Specialization required for doctors".to_string(),
        ));
    }

    let client = BackendClient::new(&config);

    let result: Value = client.request(
        Method::POST,
        "/api/register",
        None,
        Some(json!(request)),
    ).await
        .map_err(AppError::from_backend)?;

    Ok(Json(result))
}

pub async fn login(
    State(config): State<Arc<AppConfig>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    debug!("Login attempt for {} account", request.user_type);

    if request.email.is_empty() || request.password.is_empty() {
        return Err(AppError::BadRequest(
            "Missing email, password, or userType".to_string(),
        ));
    }

    let client = BackendClient::new(&config);

    let response: LoginResponse = client.request(
        Method::POST,
        "/api/login",
        None,
        Some(json!(request)),
    ).await
        .map_err(AppError::from_backend)?;

    Ok(Json(response))
}

pub async fn validate(
    State(config): State<Arc<AppConfig>>,
    headers: HeaderMap,
) -> Result<Json<TokenResponse>, AppError> {
    debug!("Validating token");

    let token = extract_bearer_token(&headers)?;

    match validate_token(&token, &config.jwt_secret) {
        Ok(user) => {
            let response = TokenResponse {
                valid: true,
                user_id: user.id,
                user_type: user.user_type,
            };

            Ok(Json(response))
        }
        Err(err) => Err(AppError::Auth(err)),
    }
}

pub async fn verify(
    State(config): State<Arc<AppConfig>>,
    headers: HeaderMap,
) -> Result<Json<Value>, AppError> {
    debug!("Verifying token");

    let token = extract_bearer_token(&headers)?;

    match validate_token(&token, &config.jwt_secret) {
        Ok(_) => Ok(Json(json!({ "valid": true }))),
        Err(_) => Ok(Json(json!({ "valid": false }))),
    }
}
