//! Database service layer
//!
//! PostgreSQL implementation of [`CampusStore`], composed of one repository
//! per table plus the report queries.

use std::future::Future;
use std::time::Instant;

use async_trait::async_trait;
use uuid::Uuid;

use crate::database::connection::{self, DatabasePool};
use crate::database::repositories::{
    AttendanceRepository, CollegeRepository, EventRepository, RegistrationRepository,
    ReportRepository, StudentRepository,
};
use crate::database::store::CampusStore;
use crate::models::*;
use crate::utils::errors::Result;
use crate::utils::logging::log_store_operation;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pool: DatabasePool,
    pub colleges: CollegeRepository,
    pub events: EventRepository,
    pub students: StudentRepository,
    pub registrations: RegistrationRepository,
    pub attendance: AttendanceRepository,
    pub reports: ReportRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            colleges: CollegeRepository::new(pool.clone()),
            events: EventRepository::new(pool.clone()),
            students: StudentRepository::new(pool.clone()),
            registrations: RegistrationRepository::new(pool.clone()),
            attendance: AttendanceRepository::new(pool.clone()),
            reports: ReportRepository::new(pool.clone()),
            pool,
        }
    }

    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }
}

async fn timed<T>(operation: &str, entity: &str, fut: impl Future<Output = Result<T>>) -> Result<T> {
    let started = Instant::now();
    let result = fut.await;
    log_store_operation(operation, entity, started.elapsed().as_millis() as u64, result.as_ref().err());
    result
}

#[async_trait]
impl CampusStore for DatabaseService {
    async fn list_colleges(&self) -> Result<Vec<College>> {
        timed("list", "college", self.colleges.list()).await
    }

    async fn get_college(&self, id: Uuid) -> Result<Option<College>> {
        timed("get", "college", self.colleges.find_by_id(id)).await
    }

    async fn create_college(&self, request: CreateCollegeRequest) -> Result<College> {
        timed("create", "college", self.colleges.create(request)).await
    }

    async fn update_college(&self, id: Uuid, request: UpdateCollegeRequest) -> Result<Option<College>> {
        timed("update", "college", self.colleges.update(id, request)).await
    }

    async fn delete_college(&self, id: Uuid) -> Result<bool> {
        timed("delete", "college", self.colleges.delete(id)).await
    }

    async fn list_events(&self) -> Result<Vec<EventWithCollege>> {
        timed("list", "event", self.events.list_with_college()).await
    }

    async fn get_event(&self, id: Uuid) -> Result<Option<Event>> {
        timed("get", "event", self.events.find_by_id(id)).await
    }

    async fn create_event(&self, request: CreateEventRequest) -> Result<Event> {
        timed("create", "event", self.events.create(request)).await
    }

    async fn update_event(&self, id: Uuid, request: UpdateEventRequest) -> Result<Option<Event>> {
        timed("update", "event", self.events.update(id, request)).await
    }

    async fn delete_event(&self, id: Uuid) -> Result<bool> {
        timed("delete", "event", self.events.delete(id)).await
    }

    async fn list_students(&self) -> Result<Vec<StudentWithCollege>> {
        timed("list", "student", self.students.list_with_college()).await
    }

    async fn get_student(&self, id: Uuid) -> Result<Option<Student>> {
        timed("get", "student", self.students.find_by_id(id)).await
    }

    async fn create_student(&self, request: CreateStudentRequest) -> Result<Student> {
        timed("create", "student", self.students.create(request)).await
    }

    async fn update_student(&self, id: Uuid, request: UpdateStudentRequest) -> Result<Option<Student>> {
        timed("update", "student", self.students.update(id, request)).await
    }

    async fn delete_student(&self, id: Uuid) -> Result<bool> {
        timed("delete", "student", self.students.delete(id)).await
    }

    async fn list_registrations(&self) -> Result<Vec<RegistrationWithDetails>> {
        timed("list", "registration", self.registrations.list_with_details()).await
    }

    async fn get_registration(&self, id: Uuid) -> Result<Option<Registration>> {
        timed("get", "registration", self.registrations.find_by_id(id)).await
    }

    async fn create_registration(&self, request: CreateRegistrationRequest) -> Result<Registration> {
        timed("create", "registration", self.registrations.create(request)).await
    }

    async fn delete_registration(&self, id: Uuid) -> Result<bool> {
        timed("delete", "registration", self.registrations.delete(id)).await
    }

    async fn attendance_for_event(&self, event_id: Uuid) -> Result<Vec<AttendanceWithRegistration>> {
        timed("list", "attendance", self.attendance.for_event(event_id)).await
    }

    async fn mark_attendance(&self, request: MarkAttendanceRequest) -> Result<Attendance> {
        timed("create", "attendance", self.attendance.mark(request)).await
    }

    async fn update_attendance(&self, id: Uuid, attended: bool) -> Result<Option<Attendance>> {
        timed("update", "attendance", self.attendance.update(id, attended)).await
    }

    async fn feedback_for_event(&self, event_id: Uuid) -> Result<Vec<FeedbackWithRegistration>> {
        timed("list", "feedback", self.attendance.feedback_for_event(event_id)).await
    }

    async fn submit_feedback(&self, request: SubmitFeedbackRequest) -> Result<Feedback> {
        timed("create", "feedback", self.attendance.submit_feedback(request)).await
    }

    async fn event_registration_stats(&self) -> Result<Vec<RegistrationStat>> {
        self.reports.registration_stats().await
    }

    async fn event_attendance_stats(&self) -> Result<Vec<AttendanceStat>> {
        self.reports.attendance_stats().await
    }

    async fn event_feedback_stats(&self) -> Result<Vec<FeedbackStat>> {
        self.reports.feedback_stats().await
    }

    async fn event_popularity_report(&self) -> Result<Vec<PopularityEntry>> {
        self.reports.popularity_report().await
    }

    async fn student_participation_report(&self) -> Result<Vec<ParticipationEntry>> {
        self.reports.participation_report().await
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats> {
        self.reports.dashboard_stats().await
    }

    async fn health_check(&self) -> Result<()> {
        connection::health_check(&self.pool).await
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database connection pool closed");
    }

    fn backend_type(&self) -> &'static str {
        "postgres"
    }
}
