// libs/appointment-cell/src/services/booking.rs
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, info};

use doctor_cell::services::doctor::DoctorService;
use doctor_cell::services::schedule::is_slot_available;
use shared_config::AppConfig;
use shared_database::backend::BackendClient;

use crate::models::{
    Appointment, AppointmentError, BookAppointmentRequest, RescheduleAppointmentRequest,
};

pub struct BookingService {
    backend: BackendClient,
    doctor_service: DoctorService,
}

impl BookingService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            backend: BackendClient::new(config),
            doctor_service: DoctorService::new(config),
        }
    }

    /// Book an appointment for the calling patient.
    ///
    /// The doctor's weekly schedule is checked locally first so an obviously
    /// dead slot never leaves the gateway; the backend re-validates and owns
    /// the conflict check against already-booked appointments.
    pub async fn book_appointment(
        &self,
        request: BookAppointmentRequest,
        auth_token: &str,
    ) -> Result<Appointment, AppointmentError> {
        info!("Booking appointment with doctor {} on {} {}",
              request.doctor_id, request.date, request.time);

        if request.time.is_empty() {
            return Err(AppointmentError::Validation(
                "Appointment time is required".to_string(),
            ));
        }

        self.precheck_slot(&request.doctor_id, request.date, &request.time, auth_token)
            .await?;

        let body = json!({
            "doctorId": request.doctor_id,
            "date": request.date.format("%Y-%m-%d").to_string(),
            "time": request.time,
            "reason": request.reason.unwrap_or_default(),
        });

        let response: Value = self.backend.request(
            Method::POST,
            "/api/appointments",
            Some(auth_token),
            Some(body),
        ).await?;

        let appointment: Appointment = serde_json::from_value(response["appointment"].clone())
            .map_err(|e| AppointmentError::Backend(e.into()))?;

        info!("Appointment booked with ID: {}", appointment.id);
        Ok(appointment)
    }

    /// Appointments for the calling patient, newest first (backend order).
    pub async fn list_for_patient(&self, auth_token: &str) -> Result<Vec<Appointment>, AppointmentError> {
        debug!("Fetching patient appointments");

        let appointments: Vec<Appointment> = self.backend.request(
            Method::GET,
            "/api/appointments/patient",
            Some(auth_token),
            None,
        ).await?;

        Ok(appointments)
    }

    /// Appointments for the calling doctor, newest first (backend order).
    pub async fn list_for_doctor(&self, auth_token: &str) -> Result<Vec<Appointment>, AppointmentError> {
        debug!("Fetching doctor appointments");

        let appointments: Vec<Appointment> = self.backend.request(
            Method::GET,
            "/api/appointments/doctor",
            Some(auth_token),
            None,
        ).await?;

        Ok(appointments)
    }

    /// Cancel an upcoming appointment. Ownership and status checks are
    /// enforced by the backend.
    pub async fn cancel_appointment(
        &self,
        appointment_id: &str,
        auth_token: &str,
    ) -> Result<Value, AppointmentError> {
        info!("Cancelling appointment: {}", appointment_id);

        let path = format!("/api/appointments/{}", appointment_id);
        let result: Value = self.backend.request(
            Method::DELETE,
            &path,
            Some(auth_token),
            None,
        ).await?;

        Ok(result)
    }

    /// Move an upcoming appointment to a new date/time, prechecking the new
    /// slot when the caller supplied the doctor id.
    pub async fn reschedule_appointment(
        &self,
        appointment_id: &str,
        request: RescheduleAppointmentRequest,
        auth_token: &str,
    ) -> Result<Value, AppointmentError> {
        info!("Rescheduling appointment {} to {} {}",
              appointment_id, request.date, request.time);

        if request.time.is_empty() {
            return Err(AppointmentError::Validation(
                "Appointment time is required".to_string(),
            ));
        }

        if let Some(doctor_id) = &request.doctor_id {
            self.precheck_slot(doctor_id, request.date, &request.time, auth_token)
                .await?;
        }

        let path = format!("/api/appointments/{}", appointment_id);
        let body = json!({
            "date": request.date.format("%Y-%m-%d").to_string(),
            "time": request.time,
        });

        let result: Value = self.backend.request(
            Method::PUT,
            &path,
            Some(auth_token),
            Some(body),
        ).await?;

        Ok(result)
    }

    /// Mark an upcoming appointment as completed (doctor side).
    pub async fn complete_appointment(
        &self,
        appointment_id: &str,
        auth_token: &str,
    ) -> Result<Value, AppointmentError> {
        info!("Completing appointment: {}", appointment_id);

        let path = format!("/api/appointments/{}/complete", appointment_id);
        let result: Value = self.backend.request(
            Method::PUT,
            &path,
            Some(auth_token),
            None,
        ).await?;

        Ok(result)
    }

    /// Fail-closed local check of the doctor's weekly schedule. Fetch failures
    /// surface as backend errors; a fetched-but-unmatched slot is a conflict.
    async fn precheck_slot(
        &self,
        doctor_id: &str,
        date: chrono::NaiveDate,
        time: &str,
        auth_token: &str,
    ) -> Result<(), AppointmentError> {
        let doctor = self.doctor_service.get_doctor(doctor_id, auth_token).await?;

        if !is_slot_available(doctor.availability.as_ref(), date, time) {
            debug!("Slot precheck rejected {} {} for doctor {}", date, time, doctor_id);
            return Err(AppointmentError::SlotUnavailable {
                doctor: doctor.name.unwrap_or_else(|| "Doctor".to_string()),
            });
        }

        Ok(())
    }
}
