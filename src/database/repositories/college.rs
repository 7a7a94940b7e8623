//! College repository implementation

use sqlx::PgPool;
use chrono::Utc;
use uuid::Uuid;
use crate::models::college::{College, CreateCollegeRequest, UpdateCollegeRequest};
use crate::utils::errors::CampusError;

#[derive(Clone, Debug)]
pub struct CollegeRepository {
    pool: PgPool,
}

impl CollegeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new college
    pub async fn create(&self, request: CreateCollegeRequest) -> Result<College, CampusError> {
        let college = College::new(request);
        let college = sqlx::query_as::<_, College>(
            r#"
            INSERT INTO colleges (id, name, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, created_at, updated_at
            "#
        )
        .bind(college.id)
        .bind(college.name)
        .bind(college.created_at)
        .bind(college.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(college)
    }

    /// Find college by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<College>, CampusError> {
        let college = sqlx::query_as::<_, College>(
            "SELECT id, name, created_at, updated_at FROM colleges WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(college)
    }

    /// List all colleges ordered by name
    pub async fn list(&self) -> Result<Vec<College>, CampusError> {
        let colleges = sqlx::query_as::<_, College>(
            "SELECT id, name, created_at, updated_at FROM colleges ORDER BY name COLLATE \"C\" ASC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(colleges)
    }

    /// Update college, returning `None` when it does not exist
    pub async fn update(&self, id: Uuid, request: UpdateCollegeRequest) -> Result<Option<College>, CampusError> {
        let college = sqlx::query_as::<_, College>(
            r#"
            UPDATE colleges
            SET name = COALESCE($2, name),
                updated_at = $3
            WHERE id = $1
            RETURNING id, name, created_at, updated_at
            "#
        )
        .bind(id)
        .bind(request.name)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(college)
    }

    /// Delete college, returning whether a row was removed
    pub async fn delete(&self, id: Uuid) -> Result<bool, CampusError> {
        let result = sqlx::query("DELETE FROM colleges WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
