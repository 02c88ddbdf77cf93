use std::sync::Arc;

use axum::{
    routing::post,
    Router,
};

use shared_config::AppConfig;

use crate::handlers;

pub fn auth_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/validate", post(handlers::validate))
        .route("/verify", post(handlers::verify))
        .with_state(state)
}
