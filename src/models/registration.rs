//! Registration, attendance and feedback models

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::event::Event;
use super::student::Student;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: Uuid,
    pub event_id: Uuid,
    pub student_id: Uuid,
    pub registered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationWithDetails {
    #[serde(flatten)]
    pub registration: Registration,
    pub event: Event,
    pub student: Student,
}

/// A registration together with the registered student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationWithStudent {
    #[serde(flatten)]
    pub registration: Registration,
    pub student: Student,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRegistrationRequest {
    pub event_id: Uuid,
    pub student_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    pub id: Uuid,
    pub registration_id: Uuid,
    pub attended: bool,
    pub marked_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceWithRegistration {
    #[serde(flatten)]
    pub attendance: Attendance,
    pub registration: RegistrationWithStudent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendanceRequest {
    pub registration_id: Uuid,
    pub attended: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAttendanceRequest {
    pub attended: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: Uuid,
    pub registration_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackWithRegistration {
    #[serde(flatten)]
    pub feedback: Feedback,
    pub registration: RegistrationWithStudent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFeedbackRequest {
    pub registration_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
}

impl Registration {
    pub fn new(request: CreateRegistrationRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_id: request.event_id,
            student_id: request.student_id,
            registered_at: Utc::now(),
        }
    }
}

impl Attendance {
    pub fn new(request: MarkAttendanceRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            registration_id: request.registration_id,
            attended: request.attended,
            marked_at: Utc::now(),
        }
    }
}

impl Feedback {
    pub fn new(request: SubmitFeedbackRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            registration_id: request.registration_id,
            rating: request.rating,
            comment: request.comment,
            submitted_at: Utc::now(),
        }
    }
}
