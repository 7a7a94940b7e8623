//! Report repository implementation
//!
//! Grouping and counting happen in SQL; the percentage and mean policy is
//! shared with the in-memory store through [`crate::reports`].

use sqlx::PgPool;
use uuid::Uuid;
use crate::models::report::{
    AttendanceStat, DashboardStats, FeedbackStat, ParticipationEntry, PopularityEntry, RegistrationStat,
};
use crate::reports::{attendance_percentage, POPULARITY_LIMIT};
use crate::utils::errors::CampusError;

#[derive(Clone, Debug)]
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Registration count for every event, highest first
    pub async fn registration_stats(&self) -> Result<Vec<RegistrationStat>, CampusError> {
        let stats = sqlx::query_as::<_, RegistrationStat>(
            r#"
            SELECT e.id AS event_id, e.name AS event_name, COUNT(r.id) AS total_registrations
            FROM events e
            LEFT JOIN registrations r ON r.event_id = e.id
            GROUP BY e.id, e.name
            ORDER BY total_registrations DESC
            "#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(stats)
    }

    /// Attendance percentage for every event with at least one registration
    pub async fn attendance_stats(&self) -> Result<Vec<AttendanceStat>, CampusError> {
        let rows: Vec<(Uuid, String, i64, i64)> = sqlx::query_as(
            r#"
            SELECT e.id, e.name, COUNT(r.id),
                   COALESCE(SUM(CASE WHEN a.attended THEN 1 ELSE 0 END), 0)::BIGINT
            FROM events e
            INNER JOIN registrations r ON r.event_id = e.id
            LEFT JOIN attendance a ON a.registration_id = r.id
            GROUP BY e.id, e.name
            HAVING COUNT(r.id) > 0
            "#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(event_id, event_name, total, attended)| AttendanceStat {
                event_id,
                event_name,
                attendance_percentage: attendance_percentage(attended, total),
            })
            .collect())
    }

    /// Mean rating for every event with at least one feedback row
    pub async fn feedback_stats(&self) -> Result<Vec<FeedbackStat>, CampusError> {
        let stats = sqlx::query_as::<_, FeedbackStat>(
            r#"
            SELECT e.id AS event_id, e.name AS event_name, AVG(f.rating)::FLOAT8 AS average_rating
            FROM events e
            INNER JOIN registrations r ON r.event_id = e.id
            INNER JOIN feedback f ON f.registration_id = r.id
            GROUP BY e.id, e.name
            HAVING COUNT(f.id) > 0
            "#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(stats)
    }

    /// The most registered events
    pub async fn popularity_report(&self) -> Result<Vec<PopularityEntry>, CampusError> {
        let report = sqlx::query_as::<_, PopularityEntry>(
            r#"
            SELECT e.id AS event_id, e.name AS event_name, COUNT(r.id) AS registrations
            FROM events e
            LEFT JOIN registrations r ON r.event_id = e.id
            GROUP BY e.id, e.name
            ORDER BY registrations DESC
            LIMIT $1
            "#
        )
        .bind(POPULARITY_LIMIT as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(report)
    }

    /// Number of attended events for every student, highest first
    pub async fn participation_report(&self) -> Result<Vec<ParticipationEntry>, CampusError> {
        let report = sqlx::query_as::<_, ParticipationEntry>(
            r#"
            SELECT s.id AS student_id, s.name AS student_name,
                   COALESCE(SUM(CASE WHEN a.attended THEN 1 ELSE 0 END), 0)::BIGINT AS events_attended
            FROM students s
            LEFT JOIN registrations r ON r.student_id = s.id
            LEFT JOIN attendance a ON a.registration_id = r.id
            GROUP BY s.id, s.name
            ORDER BY events_attended DESC
            "#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(report)
    }

    /// System-wide totals read from one repeatable-read snapshot
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, CampusError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ")
            .execute(&mut *tx)
            .await?;

        let (total_events,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM events")
            .fetch_one(&mut *tx)
            .await?;

        let (total_students,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM students")
            .fetch_one(&mut *tx)
            .await?;

        let (total_registrations, attended): (i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(r.id),
                   COALESCE(SUM(CASE WHEN a.attended THEN 1 ELSE 0 END), 0)::BIGINT
            FROM registrations r
            LEFT JOIN attendance a ON a.registration_id = r.id
            "#
        )
        .fetch_one(&mut *tx)
        .await?;

        let (average_rating,): (f64,) = sqlx::query_as(
            "SELECT COALESCE(AVG(rating)::FLOAT8, 0) FROM feedback"
        )
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(DashboardStats {
            total_events,
            total_students,
            total_registrations,
            average_attendance_rate: attendance_percentage(attended, total_registrations),
            average_rating,
        })
    }
}
