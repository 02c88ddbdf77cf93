// libs/appointment-cell/src/models.rs
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

/// An appointment record as the backend serves it. Listings are scoped to one
/// side of the appointment, so the counterpart ids are optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    #[serde(default)]
    pub doctor_id: Option<String>,
    #[serde(default)]
    pub doctor_name: Option<String>,
    #[serde(default)]
    pub patient_id: Option<String>,
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Upcoming,
    Completed,
    Cancelled,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Upcoming => write!(f, "upcoming"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookAppointmentRequest {
    pub doctor_id: String,
    pub date: NaiveDate,
    pub time: String,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RescheduleAppointmentRequest {
    pub date: NaiveDate,
    pub time: String,
    /// When the caller knows the doctor (the reschedule dialog always does),
    /// passing the id enables the local schedule precheck before the round trip.
    #[serde(default)]
    pub doctor_id: Option<String>,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Error, Debug)]
pub enum AppointmentError {
    #[error("{doctor} is not available at the selected time")]
    SlotUnavailable { doctor: String },

    #[error("Invalid appointment request: {0}")]
    Validation(String),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl From<AppointmentError> for shared_models::error::AppError {
    fn from(err: AppointmentError) -> Self {
        use shared_models::error::AppError;

        match err {
            AppointmentError::SlotUnavailable { .. } => AppError::Conflict(err.to_string()),
            AppointmentError::Validation(msg) => AppError::BadRequest(msg),
            AppointmentError::Backend(e) => AppError::from_backend(e),
        }
    }
}
