//! Attendance and feedback repository implementation

use sqlx::{FromRow, PgPool};
use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::models::registration::{
    Attendance, AttendanceWithRegistration, Feedback, FeedbackWithRegistration,
    MarkAttendanceRequest, Registration, RegistrationWithStudent, SubmitFeedbackRequest,
};
use crate::models::student::Student;
use crate::utils::errors::CampusError;

/// Registration and student columns shared by the per-event joins
const REGISTRATION_STUDENT_COLUMNS: &str = r#"
    r.event_id AS reg_event_id,
    r.student_id AS reg_student_id,
    r.registered_at AS reg_registered_at,
    s.name AS student_name,
    s.email AS student_email,
    s.college_id AS student_college_id,
    s.created_at AS student_created_at,
    s.updated_at AS student_updated_at
"#;

#[derive(FromRow)]
struct RegistrationStudentColumns {
    reg_event_id: Uuid,
    reg_student_id: Uuid,
    reg_registered_at: DateTime<Utc>,
    student_name: String,
    student_email: String,
    student_college_id: Uuid,
    student_created_at: DateTime<Utc>,
    student_updated_at: DateTime<Utc>,
}

impl RegistrationStudentColumns {
    fn into_registration(self, registration_id: Uuid) -> RegistrationWithStudent {
        RegistrationWithStudent {
            registration: Registration {
                id: registration_id,
                event_id: self.reg_event_id,
                student_id: self.reg_student_id,
                registered_at: self.reg_registered_at,
            },
            student: Student {
                id: self.reg_student_id,
                name: self.student_name,
                email: self.student_email,
                college_id: self.student_college_id,
                created_at: self.student_created_at,
                updated_at: self.student_updated_at,
            },
        }
    }
}

#[derive(FromRow)]
struct AttendanceRow {
    #[sqlx(flatten)]
    attendance: Attendance,
    #[sqlx(flatten)]
    registration: RegistrationStudentColumns,
}

#[derive(FromRow)]
struct FeedbackRow {
    #[sqlx(flatten)]
    feedback: Feedback,
    #[sqlx(flatten)]
    registration: RegistrationStudentColumns,
}

#[derive(Clone, Debug)]
pub struct AttendanceRepository {
    pool: PgPool,
}

impl AttendanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record attendance for a registration
    pub async fn mark(&self, request: MarkAttendanceRequest) -> Result<Attendance, CampusError> {
        let attendance = Attendance::new(request);
        let attendance = sqlx::query_as::<_, Attendance>(
            r#"
            INSERT INTO attendance (id, registration_id, attended, marked_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, registration_id, attended, marked_at
            "#
        )
        .bind(attendance.id)
        .bind(attendance.registration_id)
        .bind(attendance.attended)
        .bind(attendance.marked_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(attendance)
    }

    /// Change the attended flag and refresh `marked_at`
    pub async fn update(&self, id: Uuid, attended: bool) -> Result<Option<Attendance>, CampusError> {
        let attendance = sqlx::query_as::<_, Attendance>(
            r#"
            UPDATE attendance
            SET attended = $2, marked_at = $3
            WHERE id = $1
            RETURNING id, registration_id, attended, marked_at
            "#
        )
        .bind(id)
        .bind(attended)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(attendance)
    }

    /// Attendance rows for an event's registrations
    pub async fn for_event(&self, event_id: Uuid) -> Result<Vec<AttendanceWithRegistration>, CampusError> {
        let rows = sqlx::query_as::<_, AttendanceRow>(&format!(
            r#"
            SELECT a.id, a.registration_id, a.attended, a.marked_at, {REGISTRATION_STUDENT_COLUMNS}
            FROM attendance a
            INNER JOIN registrations r ON r.id = a.registration_id
            INNER JOIN students s ON s.id = r.student_id
            WHERE r.event_id = $1
            "#
        ))
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| AttendanceWithRegistration {
                registration: row.registration.into_registration(row.attendance.registration_id),
                attendance: row.attendance,
            })
            .collect())
    }

    /// Submit feedback for a registration
    pub async fn submit_feedback(&self, request: SubmitFeedbackRequest) -> Result<Feedback, CampusError> {
        let feedback = Feedback::new(request);
        let feedback = sqlx::query_as::<_, Feedback>(
            r#"
            INSERT INTO feedback (id, registration_id, rating, comment, submitted_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, registration_id, rating, comment, submitted_at
            "#
        )
        .bind(feedback.id)
        .bind(feedback.registration_id)
        .bind(feedback.rating)
        .bind(feedback.comment)
        .bind(feedback.submitted_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(feedback)
    }

    /// Feedback rows for an event's registrations
    pub async fn feedback_for_event(&self, event_id: Uuid) -> Result<Vec<FeedbackWithRegistration>, CampusError> {
        let rows = sqlx::query_as::<_, FeedbackRow>(&format!(
            r#"
            SELECT f.id, f.registration_id, f.rating, f.comment, f.submitted_at, {REGISTRATION_STUDENT_COLUMNS}
            FROM feedback f
            INNER JOIN registrations r ON r.id = f.registration_id
            INNER JOIN students s ON s.id = r.student_id
            WHERE r.event_id = $1
            "#
        ))
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| FeedbackWithRegistration {
                registration: row.registration.into_registration(row.feedback.registration_id),
                feedback: row.feedback,
            })
            .collect())
    }
}
