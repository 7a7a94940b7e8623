//! Registration repository implementation

use sqlx::{FromRow, PgPool};
use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::models::event::Event;
use crate::models::student::Student;
use crate::models::registration::{Registration, RegistrationWithDetails, CreateRegistrationRequest};
use crate::utils::errors::CampusError;

#[derive(FromRow)]
struct RegistrationDetailsRow {
    #[sqlx(flatten)]
    registration: Registration,
    event_college_id: Uuid,
    event_name: String,
    event_type: String,
    event_description: Option<String>,
    event_date: DateTime<Utc>,
    event_max_capacity: i32,
    event_created_by: String,
    event_created_at: DateTime<Utc>,
    event_updated_at: DateTime<Utc>,
    student_name: String,
    student_email: String,
    student_college_id: Uuid,
    student_created_at: DateTime<Utc>,
    student_updated_at: DateTime<Utc>,
}

impl From<RegistrationDetailsRow> for RegistrationWithDetails {
    fn from(row: RegistrationDetailsRow) -> Self {
        let event = Event {
            id: row.registration.event_id,
            college_id: row.event_college_id,
            name: row.event_name,
            event_type: row.event_type,
            description: row.event_description,
            date: row.event_date,
            max_capacity: row.event_max_capacity,
            created_by: row.event_created_by,
            created_at: row.event_created_at,
            updated_at: row.event_updated_at,
        };
        let student = Student {
            id: row.registration.student_id,
            name: row.student_name,
            email: row.student_email,
            college_id: row.student_college_id,
            created_at: row.student_created_at,
            updated_at: row.student_updated_at,
        };
        Self {
            registration: row.registration,
            event,
            student,
        }
    }
}

#[derive(Clone, Debug)]
pub struct RegistrationRepository {
    pool: PgPool,
}

impl RegistrationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register a student for an event
    pub async fn create(&self, request: CreateRegistrationRequest) -> Result<Registration, CampusError> {
        let registration = Registration::new(request);
        let registration = sqlx::query_as::<_, Registration>(
            r#"
            INSERT INTO registrations (id, event_id, student_id, registered_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, event_id, student_id, registered_at
            "#
        )
        .bind(registration.id)
        .bind(registration.event_id)
        .bind(registration.student_id)
        .bind(registration.registered_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(registration)
    }

    /// Find registration by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Registration>, CampusError> {
        let registration = sqlx::query_as::<_, Registration>(
            "SELECT id, event_id, student_id, registered_at FROM registrations WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(registration)
    }

    /// List registrations with their event and student, newest first
    pub async fn list_with_details(&self) -> Result<Vec<RegistrationWithDetails>, CampusError> {
        let rows = sqlx::query_as::<_, RegistrationDetailsRow>(
            r#"
            SELECT r.id, r.event_id, r.student_id, r.registered_at,
                   e.college_id AS event_college_id,
                   e.name AS event_name,
                   e.event_type AS event_type,
                   e.description AS event_description,
                   e.date AS event_date,
                   e.max_capacity AS event_max_capacity,
                   e.created_by AS event_created_by,
                   e.created_at AS event_created_at,
                   e.updated_at AS event_updated_at,
                   s.name AS student_name,
                   s.email AS student_email,
                   s.college_id AS student_college_id,
                   s.created_at AS student_created_at,
                   s.updated_at AS student_updated_at
            FROM registrations r
            INNER JOIN events e ON e.id = r.event_id
            INNER JOIN students s ON s.id = r.student_id
            ORDER BY r.registered_at DESC
            "#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(RegistrationWithDetails::from).collect())
    }

    /// Delete registration, returning whether a row was removed
    pub async fn delete(&self, id: Uuid) -> Result<bool, CampusError> {
        let result = sqlx::query("DELETE FROM registrations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
