use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct JwtHeader {
    pub alg: String,
    pub typ: String,
}

/// Claims issued by the Appointix backend on login.
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub user_id: String,
    pub user_type: Option<String>,
    pub exp: Option<u64>,
    pub iat: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub user_type: Option<String>,
}

impl User {
    pub fn is_doctor(&self) -> bool {
        self.user_type.as_deref() == Some("doctor")
    }

    pub fn is_patient(&self) -> bool {
        self.user_type.as_deref() == Some("patient")
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub valid: bool,
    pub user_id: String,
    pub user_type: Option<String>,
}
