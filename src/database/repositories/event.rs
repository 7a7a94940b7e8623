//! Event repository implementation

use sqlx::{FromRow, PgPool};
use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::models::college::College;
use crate::models::event::{Event, EventWithCollege, CreateEventRequest, UpdateEventRequest};
use crate::utils::errors::CampusError;

const EVENT_COLUMNS: &str =
    "id, college_id, name, event_type, description, date, max_capacity, created_by, created_at, updated_at";

#[derive(FromRow)]
struct EventCollegeRow {
    #[sqlx(flatten)]
    event: Event,
    college_name: String,
    college_created_at: DateTime<Utc>,
    college_updated_at: DateTime<Utc>,
    registration_count: i64,
}

impl From<EventCollegeRow> for EventWithCollege {
    fn from(row: EventCollegeRow) -> Self {
        let college = College {
            id: row.event.college_id,
            name: row.college_name,
            created_at: row.college_created_at,
            updated_at: row.college_updated_at,
        };
        Self {
            event: row.event,
            college,
            registration_count: row.registration_count,
        }
    }
}

#[derive(Clone, Debug)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new event
    pub async fn create(&self, request: CreateEventRequest) -> Result<Event, CampusError> {
        let event = Event::new(request);
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            INSERT INTO events ({EVENT_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(event.id)
        .bind(event.college_id)
        .bind(event.name)
        .bind(event.event_type)
        .bind(event.description)
        .bind(event.date)
        .bind(event.max_capacity)
        .bind(event.created_by)
        .bind(event.created_at)
        .bind(event.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// Find event by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>, CampusError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// List events with their college and registration count, latest date first
    pub async fn list_with_college(&self) -> Result<Vec<EventWithCollege>, CampusError> {
        let rows = sqlx::query_as::<_, EventCollegeRow>(
            r#"
            SELECT e.id, e.college_id, e.name, e.event_type, e.description, e.date,
                   e.max_capacity, e.created_by, e.created_at, e.updated_at,
                   c.name AS college_name,
                   c.created_at AS college_created_at,
                   c.updated_at AS college_updated_at,
                   COUNT(r.id) AS registration_count
            FROM events e
            INNER JOIN colleges c ON c.id = e.college_id
            LEFT JOIN registrations r ON r.event_id = e.id
            GROUP BY e.id, c.id
            ORDER BY e.date DESC
            "#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(EventWithCollege::from).collect())
    }

    /// Update event, returning `None` when it does not exist
    pub async fn update(&self, id: Uuid, request: UpdateEventRequest) -> Result<Option<Event>, CampusError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            UPDATE events
            SET college_id = COALESCE($2, college_id),
                name = COALESCE($3, name),
                event_type = COALESCE($4, event_type),
                description = CASE WHEN $10 THEN $5 ELSE description END,
                date = COALESCE($6, date),
                max_capacity = COALESCE($7, max_capacity),
                created_by = COALESCE($8, created_by),
                updated_at = $9
            WHERE id = $1
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(request.college_id)
        .bind(request.name)
        .bind(request.event_type)
        .bind(request.description.clone().flatten())
        .bind(request.date)
        .bind(request.max_capacity)
        .bind(request.created_by)
        .bind(Utc::now())
        .bind(request.description.is_some())
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Delete event, returning whether a row was removed
    pub async fn delete(&self, id: Uuid) -> Result<bool, CampusError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
