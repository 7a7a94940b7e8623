use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use super::error::ApiResult;
use super::extract::{ApiJson, ApiPath};
use super::{validation, AppState};
use crate::models::{CreateEventRequest, Event, EventWithCollege, UpdateEventRequest};
use crate::utils::errors::CampusError;

fn not_found(id: Uuid) -> CampusError {
    CampusError::NotFound { entity: "Event", id }
}

/// Events with their college and registration count, latest first
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<EventWithCollege>>> {
    Ok(Json(state.store.list_events().await?))
}

pub async fn get(State(state): State<AppState>, ApiPath(id): ApiPath<Uuid>) -> ApiResult<Json<Event>> {
    let event = state.store.get_event(id).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(event))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateEventRequest>,
) -> ApiResult<(StatusCode, Json<Event>)> {
    validation::event(&request)?;
    let event = state.store.create_event(request).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateEventRequest>,
) -> ApiResult<Json<Event>> {
    validation::event_patch(&request)?;
    let event = state.store.update_event(id, request).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(event))
}

pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<Uuid>) -> ApiResult<StatusCode> {
    if !state.store.delete_event(id).await? {
        return Err(not_found(id).into());
    }
    Ok(StatusCode::NO_CONTENT)
}
