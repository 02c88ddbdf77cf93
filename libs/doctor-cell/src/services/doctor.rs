// libs/doctor-cell/src/services/doctor.rs
use anyhow::{anyhow, Result};
use reqwest::Method;
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_database::backend::BackendClient;

use crate::models::{Doctor, DoctorDetail, UpdateProfileRequest, WeeklySchedule};
use crate::services::schedule;

pub struct DoctorService {
    backend: BackendClient,
}

impl DoctorService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            backend: BackendClient::new(config),
        }
    }

    /// Fetch the public doctor listing (cards with name, specialization and
    /// the raw weekly schedule).
    pub async fn list_doctors(&self) -> Result<Vec<Doctor>> {
        debug!("Fetching public doctor listing");

        let doctors: Vec<Doctor> = self.backend.request(
            Method::GET,
            "/api/doctors",
            None,
            None,
        ).await?;

        Ok(doctors)
    }

    /// Fetch a single doctor's full profile on behalf of an authenticated user.
    pub async fn get_doctor(&self, doctor_id: &str, auth_token: &str) -> Result<DoctorDetail> {
        debug!("Fetching doctor details: {}", doctor_id);

        let path = format!("/api/doctors/{}", doctor_id);
        let doctor: DoctorDetail = self.backend.request(
            Method::GET,
            &path,
            Some(auth_token),
            None,
        ).await?;

        Ok(doctor)
    }

    /// Replace the calling doctor's weekly schedule. The backend resolves the
    /// doctor from the token; callers are expected to have run
    /// [`validate_schedule`] on the payload first.
    pub async fn update_availability(
        &self,
        new_schedule: &WeeklySchedule,
        auth_token: &str,
    ) -> Result<Value> {
        debug!("Updating doctor availability schedule");

        let result: Value = self.backend.request(
            Method::PUT,
            "/api/doctors/me/availability",
            Some(auth_token),
            Some(json!(new_schedule)),
        ).await?;

        Ok(result)
    }

    /// Update the calling doctor's phone / bio.
    pub async fn update_profile(
        &self,
        request: UpdateProfileRequest,
        auth_token: &str,
    ) -> Result<Value> {
        debug!("Updating doctor profile");

        if request.phone.is_none() && request.bio.is_none() {
            return Err(anyhow!("No profile fields provided for update"));
        }

        let mut body = serde_json::Map::new();
        if let Some(phone) = request.phone {
            body.insert("phone".to_string(), json!(phone));
        }
        if let Some(bio) = request.bio {
            body.insert("bio".to_string(), json!(bio));
        }

        let result: Value = self.backend.request(
            Method::PUT,
            "/api/doctors/me/profile",
            Some(auth_token),
            Some(Value::Object(body)),
        ).await?;

        Ok(result)
    }
}

/// Reject schedules the engine could never match against: unknown weekday keys,
/// or available days whose non-empty times are not `HH:MM`.
pub fn validate_schedule(new_schedule: &WeeklySchedule) -> Result<()> {
    for (day, slot) in &new_schedule.0 {
        if !schedule::WEEKDAYS.contains(&day.as_str()) {
            return Err(anyhow!("Unknown weekday in schedule: {}", day));
        }

        if slot.is_available {
            for time in [&slot.start_time, &slot.end_time] {
                if !time.is_empty() && schedule::parse_time(time).is_none() {
                    return Err(anyhow!("Invalid time '{}' for {}", time, day));
                }
            }
        }
    }

    Ok(())
}
