//! Store abstraction shared by the PostgreSQL and in-memory backends

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::*;
use crate::reports::top_active;
use crate::utils::errors::Result;

/// Entity store, relationship joins and reports
///
/// Lookups return `Ok(None)` for unknown ids and deletes return `Ok(false)`;
/// turning those into "not found" is the caller's job. Integrity violations
/// surface as [`CampusError::Conflict`](crate::utils::errors::CampusError::Conflict).
#[async_trait]
pub trait CampusStore: Send + Sync {
    // Colleges
    /// Every college, ordered by name in byte order
    async fn list_colleges(&self) -> Result<Vec<College>>;
    async fn get_college(&self, id: Uuid) -> Result<Option<College>>;
    async fn create_college(&self, request: CreateCollegeRequest) -> Result<College>;
    async fn update_college(&self, id: Uuid, request: UpdateCollegeRequest) -> Result<Option<College>>;
    async fn delete_college(&self, id: Uuid) -> Result<bool>;

    // Events
    /// Every event with its college and registration count, latest date first
    async fn list_events(&self) -> Result<Vec<EventWithCollege>>;
    async fn get_event(&self, id: Uuid) -> Result<Option<Event>>;
    async fn create_event(&self, request: CreateEventRequest) -> Result<Event>;
    async fn update_event(&self, id: Uuid, request: UpdateEventRequest) -> Result<Option<Event>>;
    async fn delete_event(&self, id: Uuid) -> Result<bool>;

    // Students
    /// Every student with their college, ordered by name in byte order
    /// (uppercase before lowercase, independent of database collation)
    async fn list_students(&self) -> Result<Vec<StudentWithCollege>>;
    async fn get_student(&self, id: Uuid) -> Result<Option<Student>>;
    async fn create_student(&self, request: CreateStudentRequest) -> Result<Student>;
    async fn update_student(&self, id: Uuid, request: UpdateStudentRequest) -> Result<Option<Student>>;
    async fn delete_student(&self, id: Uuid) -> Result<bool>;

    // Registrations
    /// Every registration with its event and student, newest first
    async fn list_registrations(&self) -> Result<Vec<RegistrationWithDetails>>;
    async fn get_registration(&self, id: Uuid) -> Result<Option<Registration>>;
    async fn create_registration(&self, request: CreateRegistrationRequest) -> Result<Registration>;
    async fn delete_registration(&self, id: Uuid) -> Result<bool>;

    // Attendance
    async fn attendance_for_event(&self, event_id: Uuid) -> Result<Vec<AttendanceWithRegistration>>;
    async fn mark_attendance(&self, request: MarkAttendanceRequest) -> Result<Attendance>;
    async fn update_attendance(&self, id: Uuid, attended: bool) -> Result<Option<Attendance>>;

    // Feedback
    async fn feedback_for_event(&self, event_id: Uuid) -> Result<Vec<FeedbackWithRegistration>>;
    async fn submit_feedback(&self, request: SubmitFeedbackRequest) -> Result<Feedback>;

    // Reports
    async fn event_registration_stats(&self) -> Result<Vec<RegistrationStat>>;
    async fn event_attendance_stats(&self) -> Result<Vec<AttendanceStat>>;
    async fn event_feedback_stats(&self) -> Result<Vec<FeedbackStat>>;
    async fn event_popularity_report(&self) -> Result<Vec<PopularityEntry>>;
    async fn student_participation_report(&self) -> Result<Vec<ParticipationEntry>>;
    async fn dashboard_stats(&self) -> Result<DashboardStats>;

    /// Prefix of the participation ranking, never an independent query
    async fn top_active_students(&self) -> Result<Vec<ParticipationEntry>> {
        Ok(top_active(self.student_participation_report().await?))
    }

    /// Verify the backend is reachable
    async fn health_check(&self) -> Result<()>;

    /// Release the underlying connection(s)
    async fn close(&self);

    /// Backend name for logging
    fn backend_type(&self) -> &'static str;
}
