//! In-process HTTP client over the application router

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use campus_events::{router, AppState, CampusStore, MemoryStore};

pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn new(store: Arc<dyn CampusStore>) -> Self {
        Self { router: router(AppState::new(store)) }
    }

    pub fn memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Send a request and return the status with the decoded JSON body
    /// (`Value::Null` for empty bodies)
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        self.send_request(request).await
    }

    pub async fn send_raw(&self, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("Failed to build request");

        self.send_request(request).await
    }

    async fn send_request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.expect("Router failed");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Response body is not JSON")
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, None).await
    }

    /// POST that must succeed with 201; returns the created row's id
    async fn create(&self, uri: &str, body: Value) -> String {
        let (status, created) = self.post(uri, body).await;
        assert_eq!(status, StatusCode::CREATED, "POST {} failed: {}", uri, created);
        created["id"].as_str().expect("created row has an id").to_string()
    }

    pub async fn create_college(&self, name: &str) -> String {
        self.create("/api/colleges", json!({ "name": name })).await
    }

    pub async fn create_event(&self, college_id: &str, name: &str, days_from_now: i64) -> String {
        let date = Utc::now() + Duration::days(days_from_now);
        self.create(
            "/api/events",
            json!({
                "collegeId": college_id,
                "name": name,
                "type": "Workshop",
                "description": format!("{} description", name),
                "date": date,
                "maxCapacity": 50,
                "createdBy": "Dr. Sarah Johnson",
            }),
        )
        .await
    }

    pub async fn create_student(&self, college_id: &str, name: &str) -> String {
        let email = format!("{}@student.edu", name.to_lowercase().replace(' ', "."));
        self.create(
            "/api/students",
            json!({ "name": name, "email": email, "collegeId": college_id }),
        )
        .await
    }

    pub async fn register(&self, event_id: &str, student_id: &str) -> String {
        self.create(
            "/api/registrations",
            json!({ "eventId": event_id, "studentId": student_id }),
        )
        .await
    }

    pub async fn mark(&self, registration_id: &str, attended: bool) -> String {
        self.create(
            "/api/attendance",
            json!({ "registrationId": registration_id, "attended": attended }),
        )
        .await
    }

    pub async fn rate(&self, registration_id: &str, rating: i32) -> String {
        self.create(
            "/api/feedback",
            json!({ "registrationId": registration_id, "rating": rating, "comment": null }),
        )
        .await
    }
}
