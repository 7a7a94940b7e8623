//! Student repository implementation

use sqlx::{FromRow, PgPool};
use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::models::college::College;
use crate::models::student::{Student, StudentWithCollege, CreateStudentRequest, UpdateStudentRequest};
use crate::utils::errors::CampusError;

#[derive(FromRow)]
struct StudentCollegeRow {
    #[sqlx(flatten)]
    student: Student,
    college_name: String,
    college_created_at: DateTime<Utc>,
    college_updated_at: DateTime<Utc>,
}

impl From<StudentCollegeRow> for StudentWithCollege {
    fn from(row: StudentCollegeRow) -> Self {
        let college = College {
            id: row.student.college_id,
            name: row.college_name,
            created_at: row.college_created_at,
            updated_at: row.college_updated_at,
        };
        Self { student: row.student, college }
    }
}

#[derive(Clone, Debug)]
pub struct StudentRepository {
    pool: PgPool,
}

impl StudentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new student
    pub async fn create(&self, request: CreateStudentRequest) -> Result<Student, CampusError> {
        let student = Student::new(request);
        let student = sqlx::query_as::<_, Student>(
            r#"
            INSERT INTO students (id, name, email, college_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, email, college_id, created_at, updated_at
            "#
        )
        .bind(student.id)
        .bind(student.name)
        .bind(student.email)
        .bind(student.college_id)
        .bind(student.created_at)
        .bind(student.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(student)
    }

    /// Find student by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Student>, CampusError> {
        let student = sqlx::query_as::<_, Student>(
            "SELECT id, name, email, college_id, created_at, updated_at FROM students WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(student)
    }

    /// List students with their college, ordered by name
    pub async fn list_with_college(&self) -> Result<Vec<StudentWithCollege>, CampusError> {
        let rows = sqlx::query_as::<_, StudentCollegeRow>(
            r#"
            SELECT s.id, s.name, s.email, s.college_id, s.created_at, s.updated_at,
                   c.name AS college_name,
                   c.created_at AS college_created_at,
                   c.updated_at AS college_updated_at
            FROM students s
            INNER JOIN colleges c ON c.id = s.college_id
            ORDER BY s.name COLLATE "C" ASC
            "#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(StudentWithCollege::from).collect())
    }

    /// Update student, returning `None` when it does not exist
    pub async fn update(&self, id: Uuid, request: UpdateStudentRequest) -> Result<Option<Student>, CampusError> {
        let student = sqlx::query_as::<_, Student>(
            r#"
            UPDATE students
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                college_id = COALESCE($4, college_id),
                updated_at = $5
            WHERE id = $1
            RETURNING id, name, email, college_id, created_at, updated_at
            "#
        )
        .bind(id)
        .bind(request.name)
        .bind(request.email)
        .bind(request.college_id)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(student)
    }

    /// Delete student, returning whether a row was removed
    pub async fn delete(&self, id: Uuid) -> Result<bool, CampusError> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
