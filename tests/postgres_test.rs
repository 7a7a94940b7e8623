//! PostgreSQL-backed tests
//!
//! Require Docker (testcontainers) or `TEST_DATABASE_URL`; run with
//! `cargo test -- --ignored`.

mod helpers;

use std::sync::Arc;

use axum::http::StatusCode;
use helpers::*;
use serde_json::json;
use serial_test::serial;
use uuid::Uuid;

use campus_events::database::{CampusStore, DatabaseService, MemoryStore};
use campus_events::models::*;

async fn setup() -> (TestDatabase, TestApp) {
    let database = TestDatabase::new().await;
    let app = TestApp::new(Arc::new(DatabaseService::new(database.pool.clone())));
    (database, app)
}

#[tokio::test]
#[serial]
#[ignore = "requires Docker or TEST_DATABASE_URL"]
async fn test_postgres_health() {
    let (_database, app) = setup().await;
    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["backend"], "postgres");
}

#[tokio::test]
#[serial]
#[ignore = "requires Docker or TEST_DATABASE_URL"]
async fn test_postgres_reports_match_scenarios() {
    let (_database, app) = setup().await;
    let college_id = app.create_college("MIT").await;
    let workshop = app.create_event(&college_id, "AI Workshop", 7).await;
    let fair = app.create_event(&college_id, "Career Fair", 14).await;
    let empty = app.create_event(&college_id, "Quiet Seminar", 21).await;

    // Workshop: two registrations, one attended, one without an attendance row
    let alice = app.create_student(&college_id, "Alice").await;
    let bob = app.create_student(&college_id, "Bob").await;
    let attended = app.register(&workshop, &alice).await;
    app.register(&workshop, &bob).await;
    app.mark(&attended, true).await;

    // Fair: ratings 5, 4, 3
    for (name, rating) in [("Cat", 5), ("Dan", 4), ("Eve", 3)] {
        let student_id = app.create_student(&college_id, name).await;
        let registration_id = app.register(&fair, &student_id).await;
        app.rate(&registration_id, rating).await;
    }

    let (_, attendance) = app.get("/api/reports/event-attendance").await;
    let attendance = attendance.as_array().unwrap();
    let row = attendance.iter().find(|r| r["eventId"] == workshop.as_str()).unwrap();
    assert_eq!(row["attendancePercentage"], 50);
    assert!(attendance.iter().all(|r| r["eventId"] != empty.as_str()));

    let (_, feedback) = app.get("/api/reports/event-feedback").await;
    let feedback = feedback.as_array().unwrap();
    assert_eq!(feedback.len(), 1);
    assert_eq!(feedback[0]["eventId"], fair.as_str());
    assert_eq!(feedback[0]["averageRating"].as_f64(), Some(4.0));

    let (_, registrations) = app.get("/api/reports/event-registrations").await;
    let counts: Vec<i64> = registrations
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["totalRegistrations"].as_i64().unwrap())
        .collect();
    assert_eq!(counts, vec![3, 2, 0]);

    let (_, dashboard) = app.get("/api/dashboard/stats").await;
    assert_eq!(dashboard["totalEvents"], 3);
    assert_eq!(dashboard["totalStudents"], 5);
    assert_eq!(dashboard["totalRegistrations"], 5);
    assert_eq!(dashboard["averageAttendanceRate"], 20);
    assert_eq!(dashboard["averageRating"].as_f64(), Some(4.0));
}

#[tokio::test]
#[serial]
#[ignore = "requires Docker or TEST_DATABASE_URL"]
async fn test_postgres_name_ordering_matches_memory_store() {
    let database = TestDatabase::new().await;
    let postgres = DatabaseService::new(database.pool.clone());
    let memory = MemoryStore::new();

    for store in [&postgres as &dyn CampusStore, &memory as &dyn CampusStore] {
        let lower = store
            .create_college(CreateCollegeRequest { name: "mit".to_string() })
            .await
            .unwrap();
        store
            .create_college(CreateCollegeRequest { name: "Berkeley".to_string() })
            .await
            .unwrap();
        for name in ["bob", "Alice", "carol", "Dave"] {
            store
                .create_student(CreateStudentRequest {
                    name: name.to_string(),
                    email: format!("{}@student.edu", name.to_lowercase()),
                    college_id: lower.id,
                })
                .await
                .unwrap();
        }
    }

    let student_names = |rows: Vec<StudentWithCollege>| -> Vec<String> {
        rows.into_iter().map(|row| row.student.name).collect()
    };
    let from_postgres = student_names(postgres.list_students().await.unwrap());
    let from_memory = student_names(memory.list_students().await.unwrap());
    assert_eq!(from_postgres, vec!["Alice", "Dave", "bob", "carol"]);
    assert_eq!(from_postgres, from_memory);

    let college_names = |rows: Vec<College>| -> Vec<String> { rows.into_iter().map(|c| c.name).collect() };
    assert_eq!(
        college_names(postgres.list_colleges().await.unwrap()),
        college_names(memory.list_colleges().await.unwrap())
    );
}

#[tokio::test]
#[serial]
#[ignore = "requires Docker or TEST_DATABASE_URL"]
async fn test_postgres_integrity_violations_are_conflicts() {
    let (_database, app) = setup().await;
    let college_id = app.create_college("Stanford University").await;
    let event_id = app.create_event(&college_id, "Hackathon", 3).await;
    let student_id = app.create_student(&college_id, "Fay").await;
    app.register(&event_id, &student_id).await;

    let (status, _) = app.delete(&format!("/api/events/{}", event_id)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .post("/api/registrations", json!({ "eventId": event_id, "studentId": student_id }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .post(
            "/api/students",
            json!({ "name": "Fay Again", "email": "fay@student.edu", "collegeId": college_id }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .post(
            "/api/events",
            json!({
                "collegeId": Uuid::new_v4(),
                "name": "Orphan",
                "type": "Talk",
                "date": "2030-01-01T10:00:00Z",
                "maxCapacity": 10,
                "createdBy": "Nobody",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
#[serial]
#[ignore = "requires Docker or TEST_DATABASE_URL"]
async fn test_postgres_store_primitives() {
    let database = TestDatabase::new().await;
    let store = DatabaseService::new(database.pool.clone());

    assert!(!store.delete_college(Uuid::new_v4()).await.unwrap());
    assert!(store.get_student(Uuid::new_v4()).await.unwrap().is_none());

    let college = store
        .create_college(CreateCollegeRequest { name: "UC Berkeley".to_string() })
        .await
        .unwrap();
    let renamed = store
        .update_college(college.id, UpdateCollegeRequest { name: Some("Berkeley".to_string()) })
        .await
        .unwrap()
        .expect("college exists");
    assert_eq!(renamed.name, "Berkeley");
    assert_eq!(renamed.created_at, college.created_at);
    assert!(renamed.updated_at >= college.updated_at);

    let unchanged = store
        .update_college(college.id, UpdateCollegeRequest::default())
        .await
        .unwrap()
        .expect("college exists");
    assert_eq!(unchanged.name, "Berkeley");

    let event = store
        .create_event(CreateEventRequest {
            college_id: college.id,
            name: "Open Day".to_string(),
            event_type: "Fest".to_string(),
            description: Some("Campus tour".to_string()),
            date: chrono::Utc::now(),
            max_capacity: 100,
            created_by: "Admissions".to_string(),
        })
        .await
        .unwrap();
    let kept = store
        .update_event(event.id, UpdateEventRequest { max_capacity: Some(120), ..Default::default() })
        .await
        .unwrap()
        .expect("event exists");
    assert_eq!(kept.description.as_deref(), Some("Campus tour"));
    let cleared = store
        .update_event(event.id, UpdateEventRequest { description: Some(None), ..Default::default() })
        .await
        .unwrap()
        .expect("event exists");
    assert_eq!(cleared.description, None);
    assert_eq!(cleared.max_capacity, 120);
    assert!(store.delete_event(event.id).await.unwrap());

    assert!(store.top_active_students().await.unwrap().is_empty());
    assert!(store.delete_college(college.id).await.unwrap());
    store.close().await;
}
