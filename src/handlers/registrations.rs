//! Registrations, attendance and feedback
//!
//! Attendance and feedback hang off a registration, so their routes live
//! next to it.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use super::error::ApiResult;
use super::extract::{ApiJson, ApiPath};
use super::{validation, AppState};
use crate::models::*;
use crate::utils::errors::CampusError;

fn not_found(id: Uuid) -> CampusError {
    CampusError::NotFound { entity: "Registration", id }
}

/// Registrations with their event and student, newest first
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<RegistrationWithDetails>>> {
    Ok(Json(state.store.list_registrations().await?))
}

pub async fn get(State(state): State<AppState>, ApiPath(id): ApiPath<Uuid>) -> ApiResult<Json<Registration>> {
    let registration = state.store.get_registration(id).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(registration))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateRegistrationRequest>,
) -> ApiResult<(StatusCode, Json<Registration>)> {
    let registration = state.store.create_registration(request).await?;
    Ok((StatusCode::CREATED, Json(registration)))
}

pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<Uuid>) -> ApiResult<StatusCode> {
    if !state.store.delete_registration(id).await? {
        return Err(not_found(id).into());
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn attendance_for_event(
    State(state): State<AppState>,
    ApiPath(event_id): ApiPath<Uuid>,
) -> ApiResult<Json<Vec<AttendanceWithRegistration>>> {
    Ok(Json(state.store.attendance_for_event(event_id).await?))
}

pub async fn mark_attendance(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<MarkAttendanceRequest>,
) -> ApiResult<(StatusCode, Json<Attendance>)> {
    let attendance = state.store.mark_attendance(request).await?;
    Ok((StatusCode::CREATED, Json(attendance)))
}

pub async fn update_attendance(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateAttendanceRequest>,
) -> ApiResult<Json<Attendance>> {
    let attendance = state
        .store
        .update_attendance(id, request.attended)
        .await?
        .ok_or(CampusError::NotFound { entity: "Attendance", id })?;
    Ok(Json(attendance))
}

pub async fn feedback_for_event(
    State(state): State<AppState>,
    ApiPath(event_id): ApiPath<Uuid>,
) -> ApiResult<Json<Vec<FeedbackWithRegistration>>> {
    Ok(Json(state.store.feedback_for_event(event_id).await?))
}

pub async fn submit_feedback(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SubmitFeedbackRequest>,
) -> ApiResult<(StatusCode, Json<Feedback>)> {
    validation::feedback(&request)?;
    let feedback = state.store.submit_feedback(request).await?;
    Ok((StatusCode::CREATED, Json(feedback)))
}
