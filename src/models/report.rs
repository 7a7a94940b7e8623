//! Report row shapes

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationStat {
    pub event_id: Uuid,
    pub event_name: String,
    pub total_registrations: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceStat {
    pub event_id: Uuid,
    pub event_name: String,
    pub attendance_percentage: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackStat {
    pub event_id: Uuid,
    pub event_name: String,
    pub average_rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PopularityEntry {
    pub event_id: Uuid,
    pub event_name: String,
    pub registrations: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ParticipationEntry {
    pub student_id: Uuid,
    pub student_name: String,
    pub events_attended: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_events: i64,
    pub total_students: i64,
    pub total_registrations: i64,
    pub average_attendance_rate: i64,
    pub average_rating: f64,
}
