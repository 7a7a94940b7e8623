//! College model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct College {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCollegeRequest {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCollegeRequest {
    pub name: Option<String>,
}

impl College {
    pub fn new(request: CreateCollegeRequest) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: request.name,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply the fields present in `patch` and bump `updated_at`
    pub fn apply(&mut self, patch: UpdateCollegeRequest) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        self.updated_at = Utc::now();
    }
}
