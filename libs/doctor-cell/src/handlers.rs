// libs/doctor-cell/src/handlers.rs
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

use crate::models::{UpdateProfileRequest, WeeklySchedule};
use crate::services::doctor::{validate_schedule, DoctorService};
use crate::services::schedule::availability_summary;

// ==============================================================================
// PUBLIC HANDLERS (NO AUTHENTICATION REQUIRED)
// ==============================================================================

/// Doctor cards for the browse page, each annotated with the compressed
/// schedule summary the card renderer shows under the doctor's name.
#[axum::debug_handler]
pub async fn list_doctors_public(
    State(state): State<Arc<AppConfig>>,
) -> Result<Json<Value>, AppError> {
    let doctor_service = DoctorService::new(&state);

    let doctors = doctor_service.list_doctors().await
        .map_err(AppError::from_backend)?;

    let cards: Vec<Value> = doctors.iter()
        .map(|doctor| {
            let summary = availability_summary(doctor.availability.as_ref());
            let mut card = json!(doctor);
            card["availabilitySummary"] = json!(summary.to_string());
            card
        })
        .collect();

    Ok(Json(json!({
        "doctors": cards,
        "total": cards.len()
    })))
}

// ==============================================================================
// PROTECTED HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn get_doctor(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<String>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let token = auth.token();
    let doctor_service = DoctorService::new(&state);

    let doctor = doctor_service.get_doctor(&doctor_id, token).await
        .map_err(|_| AppError::NotFound("Doctor not found".to_string()))?;

    // Patients may view any doctor for booking; doctors only their own profile.
    if user.is_doctor() {
        if doctor.user_id.as_deref() != Some(user.id.as_str()) {
            return Err(AppError::Forbidden(
                "Doctors can only access their own profile".to_string(),
            ));
        }
    } else if !user.is_patient() {
        return Err(AppError::Forbidden("Unauthorized user type".to_string()));
    }

    Ok(Json(json!(doctor)))
}

#[axum::debug_handler]
pub async fn get_doctor_availability(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<String>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<Value>, AppError> {
    let token = auth.token();
    let doctor_service = DoctorService::new(&state);

    let doctor = doctor_service.get_doctor(&doctor_id, token).await
        .map_err(|_| AppError::NotFound("Doctor not found".to_string()))?;

    let summary = availability_summary(doctor.availability.as_ref());

    Ok(Json(json!({
        "doctorId": doctor.id,
        "availability": doctor.availability,
        "summary": summary.to_string()
    })))
}

#[axum::debug_handler]
pub async fn update_availability(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Json(new_schedule): Json<WeeklySchedule>,
) -> Result<Json<Value>, AppError> {
    let token = auth.token();

    if !user.is_doctor() {
        return Err(AppError::Forbidden(
            "Only doctors can update availability".to_string(),
        ));
    }

    validate_schedule(&new_schedule)
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let doctor_service = DoctorService::new(&state);

    let result = doctor_service.update_availability(&new_schedule, token).await
        .map_err(AppError::from_backend)?;

    Ok(Json(result))
}

#[axum::debug_handler]
pub async fn update_profile(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<Value>, AppError> {
    let token = auth.token();

    if !user.is_doctor() {
        return Err(AppError::Forbidden(
            "Only doctors can update profile".to_string(),
        ));
    }

    if request.phone.is_none() && request.bio.is_none() {
        return Err(AppError::BadRequest(
            "No profile fields provided for update".to_string(),
        ));
    }

    let doctor_service = DoctorService::new(&state);

    let result = doctor_service.update_profile(request, token).await
        .map_err(AppError::from_backend)?;

    Ok(Json(result))
}
