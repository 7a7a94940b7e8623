//! Report endpoints
//!
//! Every call recomputes from current data; timing and row counts are logged.

use std::future::Future;
use std::time::Instant;

use axum::extract::State;
use axum::Json;

use super::error::ApiResult;
use super::AppState;
use crate::models::*;
use crate::utils::errors::Result;
use crate::utils::logging::log_report_generated;

async fn rows<T>(report: &str, fut: impl Future<Output = Result<Vec<T>>>) -> ApiResult<Json<Vec<T>>> {
    let started = Instant::now();
    let rows = fut.await?;
    log_report_generated(report, rows.len(), started.elapsed().as_millis() as u64);
    Ok(Json(rows))
}

pub async fn event_registrations(State(state): State<AppState>) -> ApiResult<Json<Vec<RegistrationStat>>> {
    rows("event-registrations", state.store.event_registration_stats()).await
}

pub async fn event_attendance(State(state): State<AppState>) -> ApiResult<Json<Vec<AttendanceStat>>> {
    rows("event-attendance", state.store.event_attendance_stats()).await
}

pub async fn event_feedback(State(state): State<AppState>) -> ApiResult<Json<Vec<FeedbackStat>>> {
    rows("event-feedback", state.store.event_feedback_stats()).await
}

pub async fn event_popularity(State(state): State<AppState>) -> ApiResult<Json<Vec<PopularityEntry>>> {
    rows("event-popularity", state.store.event_popularity_report()).await
}

pub async fn student_participation(State(state): State<AppState>) -> ApiResult<Json<Vec<ParticipationEntry>>> {
    rows("student-participation", state.store.student_participation_report()).await
}

pub async fn top_active_students(State(state): State<AppState>) -> ApiResult<Json<Vec<ParticipationEntry>>> {
    rows("top-active-students", state.store.top_active_students()).await
}

pub async fn dashboard(State(state): State<AppState>) -> ApiResult<Json<DashboardStats>> {
    let started = Instant::now();
    let stats = state.store.dashboard_stats().await?;
    log_report_generated("dashboard", 1, started.elapsed().as_millis() as u64);
    Ok(Json(stats))
}
