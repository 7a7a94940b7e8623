use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use super::error::ApiResult;
use super::extract::{ApiJson, ApiPath};
use super::{validation, AppState};
use crate::models::{CreateStudentRequest, Student, StudentWithCollege, UpdateStudentRequest};
use crate::utils::errors::CampusError;

fn not_found(id: Uuid) -> CampusError {
    CampusError::NotFound { entity: "Student", id }
}

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<StudentWithCollege>>> {
    Ok(Json(state.store.list_students().await?))
}

pub async fn get(State(state): State<AppState>, ApiPath(id): ApiPath<Uuid>) -> ApiResult<Json<Student>> {
    let student = state.store.get_student(id).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(student))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateStudentRequest>,
) -> ApiResult<(StatusCode, Json<Student>)> {
    validation::student(&request)?;
    let student = state.store.create_student(request).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateStudentRequest>,
) -> ApiResult<Json<Student>> {
    validation::student_patch(&request)?;
    let student = state.store.update_student(id, request).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(student))
}

pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<Uuid>) -> ApiResult<StatusCode> {
    if !state.store.delete_student(id).await? {
        return Err(not_found(id).into());
    }
    Ok(StatusCode::NO_CONTENT)
}
