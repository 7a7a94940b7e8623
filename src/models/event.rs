//! Event model

use serde::{Deserialize, Deserializer, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::college::College;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub college_id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub max_capacity: i32,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An event joined with its owning college and registration count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventWithCollege {
    #[serde(flatten)]
    pub event: Event,
    pub college: College,
    pub registration_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub college_id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub max_capacity: i32,
    pub created_by: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    pub college_id: Option<Uuid>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    /// Absent keeps the description, `null` clears it
    #[serde(default, deserialize_with = "present_field", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    pub date: Option<DateTime<Utc>>,
    pub max_capacity: Option<i32>,
    pub created_by: Option<String>,
}

/// Distinguishes an explicit `null` from a missing key
fn present_field<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl Event {
    pub fn new(request: CreateEventRequest) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            college_id: request.college_id,
            name: request.name,
            event_type: request.event_type,
            description: request.description,
            date: request.date,
            max_capacity: request.max_capacity,
            created_by: request.created_by,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply the fields present in `patch` and bump `updated_at`
    pub fn apply(&mut self, patch: UpdateEventRequest) {
        if let Some(college_id) = patch.college_id {
            self.college_id = college_id;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(event_type) = patch.event_type {
            self.event_type = event_type;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(max_capacity) = patch.max_capacity {
            self.max_capacity = max_capacity;
        }
        if let Some(created_by) = patch.created_by {
            self.created_by = created_by;
        }
        self.updated_at = Utc::now();
    }
}
