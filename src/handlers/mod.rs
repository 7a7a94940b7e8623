//! HTTP handlers
//!
//! JSON request/response layer over [`CampusStore`]. Handlers validate
//! fields, call the store and map its results onto status codes:
//! - `colleges`, `events`, `students` for entity CRUD
//! - `registrations` for registrations, attendance and feedback
//! - `reports` for the aggregation endpoints and the dashboard

pub mod colleges;
pub mod error;
pub mod events;
pub mod extract;
pub mod registrations;
pub mod reports;
pub mod students;
pub mod validation;

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::Method;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::database::CampusStore;
use error::ApiResult;

pub use error::ApiError;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CampusStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn CampusStore>) -> Self {
        Self { store }
    }
}

/// Build the application router with tracing and CORS layers applied
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let api = Router::new()
        .route("/colleges", get(colleges::list).post(colleges::create))
        .route(
            "/colleges/:id",
            get(colleges::get).put(colleges::update).delete(colleges::delete),
        )
        .route("/events", get(events::list).post(events::create))
        .route(
            "/events/:id",
            get(events::get).put(events::update).delete(events::delete),
        )
        .route("/events/:id/attendance", get(registrations::attendance_for_event))
        .route("/events/:id/feedback", get(registrations::feedback_for_event))
        .route("/students", get(students::list).post(students::create))
        .route(
            "/students/:id",
            get(students::get).put(students::update).delete(students::delete),
        )
        .route("/registrations", get(registrations::list).post(registrations::create))
        .route(
            "/registrations/:id",
            get(registrations::get).delete(registrations::delete),
        )
        .route("/attendance", post(registrations::mark_attendance))
        .route("/attendance/:id", put(registrations::update_attendance))
        .route("/feedback", post(registrations::submit_feedback))
        .route("/reports/event-registrations", get(reports::event_registrations))
        .route("/reports/event-attendance", get(reports::event_attendance))
        .route("/reports/event-feedback", get(reports::event_feedback))
        .route("/reports/event-popularity", get(reports::event_popularity))
        .route("/reports/student-participation", get(reports::student_participation))
        .route("/reports/top-active-students", get(reports::top_active_students))
        .route("/dashboard/stats", get(reports::dashboard));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    state.store.health_check().await?;
    Ok(Json(json!({
        "status": "ok",
        "backend": state.store.backend_type(),
    })))
}
