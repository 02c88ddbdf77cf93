use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn appointment_routes(state: Arc<AppConfig>) -> Router {
    // Every appointment endpoint requires authentication
    Router::new()
        .route("/", post(handlers::book_appointment))
        .route("/patient", get(handlers::list_patient_appointments))
        .route("/doctor", get(handlers::list_doctor_appointments))
        .route(
            "/{appointment_id}",
            delete(handlers::cancel_appointment).put(handlers::reschedule_appointment),
        )
        .route("/{appointment_id}/complete", put(handlers::complete_appointment))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}
