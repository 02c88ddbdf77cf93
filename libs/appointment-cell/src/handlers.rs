// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    Json,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::{BookAppointmentRequest, RescheduleAppointmentRequest};
use crate::services::booking::BookingService;

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let token = auth.token();

    if !user.is_patient() {
        return Err(AppError::Forbidden(
            "Only patients can book appointments".to_string(),
        ));
    }

    let booking_service = BookingService::new(&state);

    let appointment = booking_service.book_appointment(request, token).await
        .map_err(AppError::from)?;

    Ok(Json(json!({
        "message": "Appointment booked successfully!",
        "appointment": appointment
    })))
}

#[axum::debug_handler]
pub async fn list_patient_appointments(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let token = auth.token();

    if !user.is_patient() {
        return Err(AppError::Forbidden(
            "Only patients can view their appointments".to_string(),
        ));
    }

    let booking_service = BookingService::new(&state);

    let appointments = booking_service.list_for_patient(token).await
        .map_err(AppError::from)?;

    Ok(Json(json!(appointments)))
}

#[axum::debug_handler]
pub async fn list_doctor_appointments(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let token = auth.token();

    if !user.is_doctor() {
        return Err(AppError::Forbidden(
            "Only doctors can view their appointments".to_string(),
        ));
    }

    let booking_service = BookingService::new(&state);

    let appointments = booking_service.list_for_doctor(token).await
        .map_err(AppError::from)?;

    Ok(Json(json!(appointments)))
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<Arc<AppConfig>>,
    Path(appointment_id): Path<String>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let token = auth.token();

    if !user.is_patient() {
        return Err(AppError::Forbidden(
            "Only patients can cancel their appointments".to_string(),
        ));
    }

    let booking_service = BookingService::new(&state);

    let result = booking_service.cancel_appointment(&appointment_id, token).await
        .map_err(AppError::from)?;

    Ok(Json(result))
}

#[axum::debug_handler]
pub async fn reschedule_appointment(
    State(state): State<Arc<AppConfig>>,
    Path(appointment_id): Path<String>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Json(request): Json<RescheduleAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let token = auth.token();

    if !user.is_patient() {
        return Err(AppError::Forbidden(
            "Only patients can reschedule their appointments".to_string(),
        ));
    }

    let booking_service = BookingService::new(&state);

    let result = booking_service
        .reschedule_appointment(&appointment_id, request, token).await
        .map_err(AppError::from)?;

    Ok(Json(result))
}

#[axum::debug_handler]
pub async fn complete_appointment(
    State(state): State<Arc<AppConfig>>,
    Path(appointment_id): Path<String>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let token = auth.token();

    if !user.is_doctor() {
        return Err(AppError::Forbidden(
            "Only doctors can complete appointments".to_string(),
        ));
    }

    let booking_service = BookingService::new(&state);

    let result = booking_service.complete_appointment(&appointment_id, token).await
        .map_err(AppError::from)?;

    Ok(Json(result))
}
