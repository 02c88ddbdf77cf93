// libs/doctor-cell/src/models.rs
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ==============================================================================
// WEEKLY SCHEDULE
// ==============================================================================

/// One weekday's availability window as the backend stores it. Times are
/// `HH:MM` strings and may be empty when the day is marked unavailable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySlot {
    #[serde(default)]
    pub is_available: bool,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
}

impl DaySlot {
    pub fn open(start_time: &str, end_time: &str) -> Self {
        Self {
            is_available: true,
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
        }
    }

    pub fn closed() -> Self {
        Self::default()
    }
}

/// A doctor's recurring weekly schedule, keyed by English weekday name
/// ("Monday" .. "Sunday"). Days with no entry are treated as unavailable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklySchedule(pub HashMap<String, DaySlot>);

impl WeeklySchedule {
    pub fn day(&self, weekday: &str) -> Option<&DaySlot> {
        self.0.get(weekday)
    }

    pub fn set_day(&mut self, weekday: &str, slot: DaySlot) {
        self.0.insert(weekday.to_string(), slot);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ==============================================================================
// DOCTOR MODELS
// ==============================================================================

/// Public doctor card as returned by the backend's doctor listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: String,
    pub name: Option<String>,
    pub specialization: Option<String>,
    #[serde(default)]
    pub profile_picture_url: Option<String>,
    #[serde(default)]
    pub availability: Option<WeeklySchedule>,
}

/// Full doctor profile, only served to authenticated users.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorDetail {
    pub id: String,
    // The backend serves this one key in snake_case
    #[serde(rename = "user_id", default)]
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub specialization: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub profile_picture_url: Option<String>,
    #[serde(default)]
    pub availability: Option<WeeklySchedule>,
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub phone: Option<String>,
    pub bio: Option<String>,
}
