use std::sync::Arc;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::User;

pub struct TestConfig {
    pub jwt_secret: String,
    pub backend_url: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "test-secret-key-for-jwt-validation-must-be-long-enough".to_string(),
            backend_url: "http://localhost:5001".to_string(),
        }
    }
}

impl TestConfig {
    pub fn with_backend_url(backend_url: &str) -> Self {
        Self {
            backend_url: backend_url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            backend_url: self.backend_url.clone(),
            jwt_secret: self.jwt_secret.clone(),
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct TestUser {
    pub id: String,
    pub user_type: String,
}

impl Default for TestUser {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_type: "patient".to_string(),
        }
    }
}

impl TestUser {
    pub fn new(user_type: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_type: user_type.to_string(),
        }
    }

    pub fn doctor() -> Self {
        Self::new("doctor")
    }

    pub fn patient() -> Self {
        Self::new("patient")
    }

    pub fn to_user(&self) -> User {
        User {
            id: self.id.clone(),
            user_type: Some(self.user_type.clone()),
        }
    }

    /// Sign an HS256 token for this user the way the backend does on login.
    pub fn to_token(&self, jwt_secret: &str) -> String {
        let header = json!({ "alg": "HS256", "typ": "JWT" });
        let claims = json!({
            "user_id": self.id,
            "user_type": self.user_type,
            "exp": (Utc::now() + Duration::hours(24)).timestamp(),
            "iat": Utc::now().timestamp(),
        });

        let header_b64 = URL_SAFE_NO_PAD.encode(header.to_string());
        let claims_b64 = URL_SAFE_NO_PAD.encode(claims.to_string());
        let signing_input = format!("{}.{}", header_b64, claims_b64);

        let mut mac = Hmac::<Sha256>::new_from_slice(jwt_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(signing_input.as_bytes());
        let signature_b64 = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        format!("{}.{}", signing_input, signature_b64)
    }
}
