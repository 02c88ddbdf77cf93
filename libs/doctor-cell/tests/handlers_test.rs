// libs/doctor-cell/tests/handlers_test.rs

use std::sync::Arc;

use assert_matches::assert_matches;
use axum::extract::{Extension, Path, State};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use doctor_cell::handlers::*;
use doctor_cell::models::{UpdateProfileRequest, WeeklySchedule};
use shared_config::AppConfig;
use shared_models::{auth::User, error::AppError};
use shared_utils::test_utils::{TestConfig, TestUser};

fn state_for(mock_server: &MockServer) -> State<Arc<AppConfig>> {
    State(TestConfig::with_backend_url(&mock_server.uri()).to_arc())
}

fn user_extension(user: &TestUser) -> Extension<User> {
    Extension(user.to_user())
}

fn auth_header() -> TypedHeader<Authorization<Bearer>> {
    TypedHeader(Authorization::bearer("test-token").unwrap())
}

fn weekday_availability() -> serde_json::Value {
    json!({
        "Monday": { "isAvailable": true, "startTime": "09:00", "endTime": "17:00" },
        "Tuesday": { "isAvailable": true, "startTime": "09:00", "endTime": "17:00" },
        "Wednesday": { "isAvailable": true, "startTime": "09:00", "endTime": "17:00" },
        "Thursday": { "isAvailable": true, "startTime": "09:00", "endTime": "17:00" },
        "Friday": { "isAvailable": true, "startTime": "09:00", "endTime": "17:00" },
        "Saturday": { "isAvailable": false, "startTime": "", "endTime": "" },
        "Sunday": { "isAvailable": false, "startTime": "", "endTime": "" }
    })
}

fn doctor_detail_response(doctor_id: &str, user_id: &str) -> serde_json::Value {
    json!({
        "id": doctor_id,
        "user_id": user_id,
        "name": "Dr. Alice Chen",
        "specialization": "Cardiology",
        "email": "alice@example.com",
        "phone": "555-0100",
        "bio": "Cardiologist",
        "profilePictureUrl": null,
        "availability": weekday_availability()
    })
}

#[tokio::test]
async fn public_listing_includes_availability_summary() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/doctors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": Uuid::new_v4().to_string(),
                "name": "Dr. Alice Chen",
                "specialization": "Cardiology",
                "profilePictureUrl": null,
                "availability": weekday_availability()
            },
            {
                "id": Uuid::new_v4().to_string(),
                "name": "Dr. Bob Okafor",
                "specialization": "Dermatology",
                "profilePictureUrl": null,
                "availability": null
            }
        ])))
        .mount(&mock_server)
        .await;

    let result = list_doctors_public(state_for(&mock_server)).await;

    let body = result.expect("listing should succeed").0;
    assert_eq!(body["total"], 2);
    assert_eq!(body["doctors"][0]["availabilitySummary"], "Mon-Fri: 09:00-17:00");
    assert_eq!(body["doctors"][1]["availabilitySummary"], "Availability not set");
}

#[tokio::test]
async fn patients_can_fetch_any_doctor() {
    let mock_server = MockServer::start().await;
    let doctor_id = Uuid::new_v4().to_string();

    Mock::given(method("GET"))
        .and(path(format!("/api/doctors/{}", doctor_id)))
        .respond_with(ResponseTemplate::new(200)
            .set_body_json(doctor_detail_response(&doctor_id, &Uuid::new_v4().to_string())))
        .mount(&mock_server)
        .await;

    let result = get_doctor(
        state_for(&mock_server),
        Path(doctor_id.clone()),
        auth_header(),
        user_extension(&TestUser::patient()),
    ).await;

    let body = result.expect("patient fetch should succeed").0;
    assert_eq!(body["id"], doctor_id.as_str());
    assert_eq!(body["name"], "Dr. Alice Chen");
}

#[tokio::test]
async fn doctors_cannot_fetch_another_doctors_profile() {
    let mock_server = MockServer::start().await;
    let doctor_id = Uuid::new_v4().to_string();

    Mock::given(method("GET"))
        .and(path(format!("/api/doctors/{}", doctor_id)))
        .respond_with(ResponseTemplate::new(200)
            .set_body_json(doctor_detail_response(&doctor_id, &Uuid::new_v4().to_string())))
        .mount(&mock_server)
        .await;

    let result = get_doctor(
        state_for(&mock_server),
        Path(doctor_id),
        auth_header(),
        user_extension(&TestUser::doctor()),
    ).await;

    assert_matches!(result, Err(AppError::Forbidden(_)));
}

#[tokio::test]
async fn doctors_can_fetch_their_own_profile() {
    let mock_server = MockServer::start().await;
    let doctor_user = TestUser::doctor();
    let doctor_id = Uuid::new_v4().to_string();

    Mock::given(method("GET"))
        .and(path(format!("/api/doctors/{}", doctor_id)))
        .respond_with(ResponseTemplate::new(200)
            .set_body_json(doctor_detail_response(&doctor_id, &doctor_user.id)))
        .mount(&mock_server)
        .await;

    let result = get_doctor(
        state_for(&mock_server),
        Path(doctor_id),
        auth_header(),
        user_extension(&doctor_user),
    ).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn availability_endpoint_returns_schedule_and_summary() {
    let mock_server = MockServer::start().await;
    let doctor_id = Uuid::new_v4().to_string();

    Mock::given(method("GET"))
        .and(path(format!("/api/doctors/{}", doctor_id)))
        .respond_with(ResponseTemplate::new(200)
            .set_body_json(doctor_detail_response(&doctor_id, &Uuid::new_v4().to_string())))
        .mount(&mock_server)
        .await;

    let result = get_doctor_availability(
        state_for(&mock_server),
        Path(doctor_id.clone()),
        auth_header(),
    ).await;

    let body = result.expect("availability fetch should succeed").0;
    assert_eq!(body["doctorId"], doctor_id.as_str());
    assert_eq!(body["summary"], "Mon-Fri: 09:00-17:00");
    assert_eq!(body["availability"]["Monday"]["startTime"], "09:00");
}

#[tokio::test]
async fn update_availability_requires_doctor_role() {
    let mock_server = MockServer::start().await;
    let schedule: WeeklySchedule = serde_json::from_value(weekday_availability()).unwrap();

    let result = update_availability(
        state_for(&mock_server),
        auth_header(),
        user_extension(&TestUser::patient()),
        axum::Json(schedule),
    ).await;

    assert_matches!(result, Err(AppError::Forbidden(_)));
}

#[tokio::test]
async fn update_availability_rejects_unknown_weekday() {
    let mock_server = MockServer::start().await;
    let schedule: WeeklySchedule = serde_json::from_value(json!({
        "Funday": { "isAvailable": true, "startTime": "09:00", "endTime": "17:00" }
    })).unwrap();

    let result = update_availability(
        state_for(&mock_server),
        auth_header(),
        user_extension(&TestUser::doctor()),
        axum::Json(schedule),
    ).await;

    assert_matches!(result, Err(AppError::ValidationError(_)));
}

#[tokio::test]
async fn update_availability_rejects_malformed_times() {
    let mock_server = MockServer::start().await;
    let schedule: WeeklySchedule = serde_json::from_value(json!({
        "Monday": { "isAvailable": true, "startTime": "late morning", "endTime": "17:00" }
    })).unwrap();

    let result = update_availability(
        state_for(&mock_server),
        auth_header(),
        user_extension(&TestUser::doctor()),
        axum::Json(schedule),
    ).await;

    assert_matches!(result, Err(AppError::ValidationError(_)));
}

#[tokio::test]
async fn update_availability_forwards_valid_schedule() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/doctors/me/availability"))
        .respond_with(ResponseTemplate::new(200)
            .set_body_json(json!({ "message": "Availability updated successfully." })))
        .mount(&mock_server)
        .await;

    let schedule: WeeklySchedule = serde_json::from_value(weekday_availability()).unwrap();

    let result = update_availability(
        state_for(&mock_server),
        auth_header(),
        user_extension(&TestUser::doctor()),
        axum::Json(schedule),
    ).await;

    let body = result.expect("update should succeed").0;
    assert_eq!(body["message"], "Availability updated successfully.");
}

#[tokio::test]
async fn update_profile_rejects_empty_request() {
    let mock_server = MockServer::start().await;

    let result = update_profile(
        state_for(&mock_server),
        auth_header(),
        user_extension(&TestUser::doctor()),
        axum::Json(UpdateProfileRequest { phone: None, bio: None }),
    ).await;

    assert_matches!(result, Err(AppError::BadRequest(_)));
}

#[tokio::test]
async fn update_profile_forwards_provided_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/doctors/me/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Profile updated successfully.",
            "profile": { "phone": "555-0199", "bio": "Updated bio" }
        })))
        .mount(&mock_server)
        .await;

    let result = update_profile(
        state_for(&mock_server),
        auth_header(),
        user_extension(&TestUser::doctor()),
        axum::Json(UpdateProfileRequest {
            phone: Some("555-0199".to_string()),
            bio: Some("Updated bio".to_string()),
        }),
    ).await;

    let body = result.expect("update should succeed").0;
    assert_eq!(body["profile"]["phone"], "555-0199");
}
