use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use super::error::ApiResult;
use super::extract::{ApiJson, ApiPath};
use super::{validation, AppState};
use crate::models::{College, CreateCollegeRequest, UpdateCollegeRequest};
use crate::utils::errors::CampusError;

fn not_found(id: Uuid) -> CampusError {
    CampusError::NotFound { entity: "College", id }
}

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<College>>> {
    Ok(Json(state.store.list_colleges().await?))
}

pub async fn get(State(state): State<AppState>, ApiPath(id): ApiPath<Uuid>) -> ApiResult<Json<College>> {
    let college = state.store.get_college(id).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(college))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateCollegeRequest>,
) -> ApiResult<(StatusCode, Json<College>)> {
    validation::college(&request)?;
    let college = state.store.create_college(request).await?;
    Ok((StatusCode::CREATED, Json(college)))
}

pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateCollegeRequest>,
) -> ApiResult<Json<College>> {
    validation::college_patch(&request)?;
    let college = state.store.update_college(id, request).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(college))
}

pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<Uuid>) -> ApiResult<StatusCode> {
    if !state.store.delete_college(id).await? {
        return Err(not_found(id).into());
    }
    Ok(StatusCode::NO_CONTENT)
}
