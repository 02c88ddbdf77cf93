use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend_url: String,
    pub jwt_secret: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            backend_url: env::var("APPOINTIX_BACKEND_URL")
                .unwrap_or_else(|_| {
                    warn!("APPOINTIX_BACKEND_URL not set, using empty value");
                    String::new()
                }),
            jwt_secret: env::var("APPOINTIX_JWT_SECRET")
                .unwrap_or_else(|_| {
                    warn!("APPOINTIX_JWT_SECRET not set, using empty value");
                    String::new()
                }),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.backend_url.is_empty() && !self.jwt_secret.is_empty()
    }
}
