//! In-memory implementation of [`CampusStore`]
//!
//! Tables are kept in insertion order behind a single `RwLock`, so every read
//! sees a consistent snapshot. Foreign keys and unique constraints mirror the
//! PostgreSQL schema, including RESTRICT on delete.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::store::CampusStore;
use crate::models::*;
use crate::reports::aggregate;
use crate::utils::errors::{CampusError, Result};

#[derive(Debug, Default)]
struct Tables {
    colleges: Vec<College>,
    events: Vec<Event>,
    students: Vec<Student>,
    registrations: Vec<Registration>,
    attendance: Vec<Attendance>,
    feedback: Vec<Feedback>,
}

impl Tables {
    fn college(&self, id: Uuid) -> Option<&College> {
        self.colleges.iter().find(|c| c.id == id)
    }

    fn event(&self, id: Uuid) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    fn student(&self, id: Uuid) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    fn registration(&self, id: Uuid) -> Option<&Registration> {
        self.registrations.iter().find(|r| r.id == id)
    }

    fn require_college(&self, id: Uuid) -> Result<()> {
        match self.college(id) {
            Some(_) => Ok(()),
            None => Err(CampusError::Conflict(format!("college {} does not exist", id))),
        }
    }

    fn require_registration(&self, id: Uuid) -> Result<()> {
        match self.registration(id) {
            Some(_) => Ok(()),
            None => Err(CampusError::Conflict(format!("registration {} does not exist", id))),
        }
    }

    fn ensure_unique_email(&self, email: &str, except: Option<Uuid>) -> Result<()> {
        let taken = self
            .students
            .iter()
            .any(|s| s.email == email && Some(s.id) != except);
        if taken {
            return Err(CampusError::Conflict(format!("email {} is already registered", email)));
        }
        Ok(())
    }

    fn college_of(&self, college_id: Uuid, owner: &str, owner_id: Uuid) -> Result<College> {
        self.college(college_id).cloned().ok_or_else(|| {
            CampusError::Integrity(format!("{} {} references missing college {}", owner, owner_id, college_id))
        })
    }

    fn student_of(&self, registration: &Registration) -> Result<Student> {
        self.student(registration.student_id).cloned().ok_or_else(|| {
            CampusError::Integrity(format!(
                "registration {} references missing student {}",
                registration.id, registration.student_id
            ))
        })
    }

    /// Registrations of `event_id` with their students, keyed by registration id
    fn registrations_for_event(&self, event_id: Uuid) -> Result<HashMap<Uuid, RegistrationWithStudent>> {
        self.registrations
            .iter()
            .filter(|r| r.event_id == event_id)
            .map(|r| {
                let student = self.student_of(r)?;
                Ok((r.id, RegistrationWithStudent { registration: r.clone(), student }))
            })
            .collect()
    }
}

/// Process-local store used for tests and `memory://` deployments
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CampusStore for MemoryStore {
    async fn list_colleges(&self) -> Result<Vec<College>> {
        let tables = self.tables.read().await;
        let mut colleges = tables.colleges.clone();
        colleges.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(colleges)
    }

    async fn get_college(&self, id: Uuid) -> Result<Option<College>> {
        Ok(self.tables.read().await.college(id).cloned())
    }

    async fn create_college(&self, request: CreateCollegeRequest) -> Result<College> {
        let college = College::new(request);
        self.tables.write().await.colleges.push(college.clone());
        Ok(college)
    }

    async fn update_college(&self, id: Uuid, request: UpdateCollegeRequest) -> Result<Option<College>> {
        let mut tables = self.tables.write().await;
        let Some(college) = tables.colleges.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        college.apply(request);
        Ok(Some(college.clone()))
    }

    async fn delete_college(&self, id: Uuid) -> Result<bool> {
        let mut tables = self.tables.write().await;
        if tables.college(id).is_none() {
            return Ok(false);
        }
        if tables.events.iter().any(|e| e.college_id == id)
            || tables.students.iter().any(|s| s.college_id == id)
        {
            return Err(CampusError::Conflict(format!("college {} is still referenced", id)));
        }
        tables.colleges.retain(|c| c.id != id);
        Ok(true)
    }

    async fn list_events(&self) -> Result<Vec<EventWithCollege>> {
        let tables = self.tables.read().await;
        let mut rows = tables
            .events
            .iter()
            .map(|event| {
                let college = tables.college_of(event.college_id, "event", event.id)?;
                let registration_count = tables
                    .registrations
                    .iter()
                    .filter(|r| r.event_id == event.id)
                    .count() as i64;
                Ok(EventWithCollege { event: event.clone(), college, registration_count })
            })
            .collect::<Result<Vec<_>>>()?;
        rows.sort_by(|a, b| b.event.date.cmp(&a.event.date));
        Ok(rows)
    }

    async fn get_event(&self, id: Uuid) -> Result<Option<Event>> {
        Ok(self.tables.read().await.event(id).cloned())
    }

    async fn create_event(&self, request: CreateEventRequest) -> Result<Event> {
        let mut tables = self.tables.write().await;
        tables.require_college(request.college_id)?;
        let event = Event::new(request);
        tables.events.push(event.clone());
        Ok(event)
    }

    async fn update_event(&self, id: Uuid, request: UpdateEventRequest) -> Result<Option<Event>> {
        let mut tables = self.tables.write().await;
        if tables.event(id).is_none() {
            return Ok(None);
        }
        if let Some(college_id) = request.college_id {
            tables.require_college(college_id)?;
        }
        let Some(event) = tables.events.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };
        event.apply(request);
        Ok(Some(event.clone()))
    }

    async fn delete_event(&self, id: Uuid) -> Result<bool> {
        let mut tables = self.tables.write().await;
        if tables.event(id).is_none() {
            return Ok(false);
        }
        if tables.registrations.iter().any(|r| r.event_id == id) {
            return Err(CampusError::Conflict(format!("event {} still has registrations", id)));
        }
        tables.events.retain(|e| e.id != id);
        Ok(true)
    }

    async fn list_students(&self) -> Result<Vec<StudentWithCollege>> {
        let tables = self.tables.read().await;
        let mut rows = tables
            .students
            .iter()
            .map(|student| {
                let college = tables.college_of(student.college_id, "student", student.id)?;
                Ok(StudentWithCollege { student: student.clone(), college })
            })
            .collect::<Result<Vec<_>>>()?;
        rows.sort_by(|a, b| a.student.name.cmp(&b.student.name));
        Ok(rows)
    }

    async fn get_student(&self, id: Uuid) -> Result<Option<Student>> {
        Ok(self.tables.read().await.student(id).cloned())
    }

    async fn create_student(&self, request: CreateStudentRequest) -> Result<Student> {
        let mut tables = self.tables.write().await;
        tables.require_college(request.college_id)?;
        tables.ensure_unique_email(&request.email, None)?;
        let student = Student::new(request);
        tables.students.push(student.clone());
        Ok(student)
    }

    async fn update_student(&self, id: Uuid, request: UpdateStudentRequest) -> Result<Option<Student>> {
        let mut tables = self.tables.write().await;
        if tables.student(id).is_none() {
            return Ok(None);
        }
        if let Some(college_id) = request.college_id {
            tables.require_college(college_id)?;
        }
        if let Some(email) = &request.email {
            tables.ensure_unique_email(email, Some(id))?;
        }
        let Some(student) = tables.students.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        student.apply(request);
        Ok(Some(student.clone()))
    }

    async fn delete_student(&self, id: Uuid) -> Result<bool> {
        let mut tables = self.tables.write().await;
        if tables.student(id).is_none() {
            return Ok(false);
        }
        if tables.registrations.iter().any(|r| r.student_id == id) {
            return Err(CampusError::Conflict(format!("student {} still has registrations", id)));
        }
        tables.students.retain(|s| s.id != id);
        Ok(true)
    }

    async fn list_registrations(&self) -> Result<Vec<RegistrationWithDetails>> {
        let tables = self.tables.read().await;
        let mut rows = tables
            .registrations
            .iter()
            .map(|registration| {
                let event = tables.event(registration.event_id).cloned().ok_or_else(|| {
                    CampusError::Integrity(format!(
                        "registration {} references missing event {}",
                        registration.id, registration.event_id
                    ))
                })?;
                let student = tables.student_of(registration)?;
                Ok(RegistrationWithDetails { registration: registration.clone(), event, student })
            })
            .collect::<Result<Vec<_>>>()?;
        rows.sort_by(|a, b| b.registration.registered_at.cmp(&a.registration.registered_at));
        Ok(rows)
    }

    async fn get_registration(&self, id: Uuid) -> Result<Option<Registration>> {
        Ok(self.tables.read().await.registration(id).cloned())
    }

    async fn create_registration(&self, request: CreateRegistrationRequest) -> Result<Registration> {
        let mut tables = self.tables.write().await;
        if tables.event(request.event_id).is_none() {
            return Err(CampusError::Conflict(format!("event {} does not exist", request.event_id)));
        }
        if tables.student(request.student_id).is_none() {
            return Err(CampusError::Conflict(format!("student {} does not exist", request.student_id)));
        }
        let duplicate = tables
            .registrations
            .iter()
            .any(|r| r.event_id == request.event_id && r.student_id == request.student_id);
        if duplicate {
            return Err(CampusError::Conflict(format!(
                "student {} is already registered for event {}",
                request.student_id, request.event_id
            )));
        }
        let registration = Registration::new(request);
        tables.registrations.push(registration.clone());
        Ok(registration)
    }

    async fn delete_registration(&self, id: Uuid) -> Result<bool> {
        let mut tables = self.tables.write().await;
        if tables.registration(id).is_none() {
            return Ok(false);
        }
        if tables.attendance.iter().any(|a| a.registration_id == id)
            || tables.feedback.iter().any(|f| f.registration_id == id)
        {
            return Err(CampusError::Conflict(format!(
                "registration {} still has attendance or feedback",
                id
            )));
        }
        tables.registrations.retain(|r| r.id != id);
        Ok(true)
    }

    async fn attendance_for_event(&self, event_id: Uuid) -> Result<Vec<AttendanceWithRegistration>> {
        let tables = self.tables.read().await;
        let mut registrations = tables.registrations_for_event(event_id)?;
        Ok(tables
            .attendance
            .iter()
            .filter_map(|attendance| {
                let registration = registrations.remove(&attendance.registration_id)?;
                Some(AttendanceWithRegistration { attendance: attendance.clone(), registration })
            })
            .collect())
    }

    async fn mark_attendance(&self, request: MarkAttendanceRequest) -> Result<Attendance> {
        let mut tables = self.tables.write().await;
        tables.require_registration(request.registration_id)?;
        if tables.attendance.iter().any(|a| a.registration_id == request.registration_id) {
            return Err(CampusError::Conflict(format!(
                "attendance already recorded for registration {}",
                request.registration_id
            )));
        }
        let attendance = Attendance::new(request);
        tables.attendance.push(attendance.clone());
        Ok(attendance)
    }

    async fn update_attendance(&self, id: Uuid, attended: bool) -> Result<Option<Attendance>> {
        let mut tables = self.tables.write().await;
        let Some(attendance) = tables.attendance.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        attendance.attended = attended;
        attendance.marked_at = chrono::Utc::now();
        Ok(Some(attendance.clone()))
    }

    async fn feedback_for_event(&self, event_id: Uuid) -> Result<Vec<FeedbackWithRegistration>> {
        let tables = self.tables.read().await;
        let mut registrations = tables.registrations_for_event(event_id)?;
        Ok(tables
            .feedback
            .iter()
            .filter_map(|feedback| {
                let registration = registrations.remove(&feedback.registration_id)?;
                Some(FeedbackWithRegistration { feedback: feedback.clone(), registration })
            })
            .collect())
    }

    async fn submit_feedback(&self, request: SubmitFeedbackRequest) -> Result<Feedback> {
        let mut tables = self.tables.write().await;
        tables.require_registration(request.registration_id)?;
        if tables.feedback.iter().any(|f| f.registration_id == request.registration_id) {
            return Err(CampusError::Conflict(format!(
                "feedback already submitted for registration {}",
                request.registration_id
            )));
        }
        let feedback = Feedback::new(request);
        tables.feedback.push(feedback.clone());
        Ok(feedback)
    }

    async fn event_registration_stats(&self) -> Result<Vec<RegistrationStat>> {
        let tables = self.tables.read().await;
        Ok(aggregate::registration_stats(&tables.events, &tables.registrations))
    }

    async fn event_attendance_stats(&self) -> Result<Vec<AttendanceStat>> {
        let tables = self.tables.read().await;
        Ok(aggregate::attendance_stats(&tables.events, &tables.registrations, &tables.attendance))
    }

    async fn event_feedback_stats(&self) -> Result<Vec<FeedbackStat>> {
        let tables = self.tables.read().await;
        Ok(aggregate::feedback_stats(&tables.events, &tables.registrations, &tables.feedback))
    }

    async fn event_popularity_report(&self) -> Result<Vec<PopularityEntry>> {
        let tables = self.tables.read().await;
        Ok(aggregate::popularity_report(&tables.events, &tables.registrations))
    }

    async fn student_participation_report(&self) -> Result<Vec<ParticipationEntry>> {
        let tables = self.tables.read().await;
        Ok(aggregate::participation_report(&tables.students, &tables.registrations, &tables.attendance))
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats> {
        let tables = self.tables.read().await;
        Ok(aggregate::dashboard(
            &tables.events,
            &tables.students,
            &tables.registrations,
            &tables.attendance,
            &tables.feedback,
        ))
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    async fn close(&self) {}

    fn backend_type(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::{Duration, Utc};

    async fn seed_college(store: &MemoryStore, name: &str) -> College {
        store
            .create_college(CreateCollegeRequest { name: name.to_string() })
            .await
            .expect("Failed to create college")
    }

    async fn seed_event(store: &MemoryStore, college: &College, name: &str, days: i64) -> Event {
        store
            .create_event(CreateEventRequest {
                college_id: college.id,
                name: name.to_string(),
                event_type: "Workshop".to_string(),
                description: None,
                date: Utc::now() + Duration::days(days),
                max_capacity: 50,
                created_by: "Dr. Sarah Johnson".to_string(),
            })
            .await
            .expect("Failed to create event")
    }

    async fn seed_student(store: &MemoryStore, college: &College, name: &str) -> Student {
        store
            .create_student(CreateStudentRequest {
                name: name.to_string(),
                email: format!("{}@student.edu", name.to_lowercase().replace(' ', ".")),
                college_id: college.id,
            })
            .await
            .expect("Failed to create student")
    }

    async fn seed_registration(store: &MemoryStore, event: &Event, student: &Student) -> Registration {
        store
            .create_registration(CreateRegistrationRequest { event_id: event.id, student_id: student.id })
            .await
            .expect("Failed to create registration")
    }

    #[tokio::test]
    async fn test_delete_missing_rows_returns_false() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();
        assert!(!store.delete_college(id).await.unwrap());
        assert!(!store.delete_event(id).await.unwrap());
        assert!(!store.delete_student(id).await.unwrap());
        assert!(!store.delete_registration(id).await.unwrap());
    }

    #[tokio::test]
    async fn test_lookups_of_missing_rows_are_absent() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();
        assert!(store.get_college(id).await.unwrap().is_none());
        assert!(store.get_event(id).await.unwrap().is_none());
        assert!(store.update_student(id, UpdateStudentRequest::default()).await.unwrap().is_none());
        assert!(store.update_attendance(id, true).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let store = MemoryStore::new();
        let college = seed_college(&store, "MIT").await;
        let event = seed_event(&store, &college, "AI Workshop", 7).await;

        let updated = store
            .update_event(event.id, UpdateEventRequest { max_capacity: Some(80), ..Default::default() })
            .await
            .unwrap()
            .expect("event exists");

        assert_eq!(updated.max_capacity, 80);
        assert_eq!(updated.name, event.name);
        assert_eq!(updated.date, event.date);
        assert!(updated.updated_at >= event.updated_at);
    }

    #[tokio::test]
    async fn test_restrict_policy_on_delete() {
        let store = MemoryStore::new();
        let college = seed_college(&store, "Stanford").await;
        let event = seed_event(&store, &college, "Career Fair", 14).await;
        let student = seed_student(&store, &college, "Bob Smith").await;
        let registration = seed_registration(&store, &event, &student).await;
        store
            .mark_attendance(MarkAttendanceRequest { registration_id: registration.id, attended: true })
            .await
            .unwrap();

        assert_matches!(store.delete_college(college.id).await, Err(CampusError::Conflict(_)));
        assert_matches!(store.delete_event(event.id).await, Err(CampusError::Conflict(_)));
        assert_matches!(store.delete_student(student.id).await, Err(CampusError::Conflict(_)));
        assert_matches!(store.delete_registration(registration.id).await, Err(CampusError::Conflict(_)));

        // Nothing was removed
        assert!(store.get_registration(registration.id).await.unwrap().is_some());
        assert_eq!(store.dashboard_stats().await.unwrap().total_registrations, 1);
    }

    #[tokio::test]
    async fn test_unique_constraints() {
        let store = MemoryStore::new();
        let college = seed_college(&store, "Berkeley").await;
        let event = seed_event(&store, &college, "Exhibition", 21).await;
        let student = seed_student(&store, &college, "Carol Davis").await;
        let registration = seed_registration(&store, &event, &student).await;

        let duplicate_email = store
            .create_student(CreateStudentRequest {
                name: "Another Carol".to_string(),
                email: student.email.clone(),
                college_id: college.id,
            })
            .await;
        assert_matches!(duplicate_email, Err(CampusError::Conflict(_)));

        let duplicate_registration = store
            .create_registration(CreateRegistrationRequest { event_id: event.id, student_id: student.id })
            .await;
        assert_matches!(duplicate_registration, Err(CampusError::Conflict(_)));

        store
            .submit_feedback(SubmitFeedbackRequest { registration_id: registration.id, rating: 4, comment: None })
            .await
            .unwrap();
        let second = store
            .submit_feedback(SubmitFeedbackRequest { registration_id: registration.id, rating: 5, comment: None })
            .await;
        assert_matches!(second, Err(CampusError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_missing_parent_is_a_conflict() {
        let store = MemoryStore::new();
        let result = store
            .create_student(CreateStudentRequest {
                name: "Orphan".to_string(),
                email: "orphan@student.edu".to_string(),
                college_id: Uuid::new_v4(),
            })
            .await;
        assert_matches!(result, Err(CampusError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_joined_listings_are_ordered() {
        let store = MemoryStore::new();
        let college = seed_college(&store, "MIT").await;
        let soon = seed_event(&store, &college, "Soon", 1).await;
        let later = seed_event(&store, &college, "Later", 30).await;
        let zed = seed_student(&store, &college, "Zed").await;
        let amy = seed_student(&store, &college, "Amy").await;
        let first = seed_registration(&store, &soon, &zed).await;
        let second = seed_registration(&store, &soon, &amy).await;

        let events = store.list_events().await.unwrap();
        assert_eq!(events[0].event.id, later.id);
        assert_eq!(events[0].registration_count, 0);
        assert_eq!(events[1].event.id, soon.id);
        assert_eq!(events[1].registration_count, 2);
        assert_eq!(events[1].college, college);

        let students = store.list_students().await.unwrap();
        assert_eq!(students[0].student.id, amy.id);
        assert_eq!(students[1].student.id, zed.id);

        let registrations = store.list_registrations().await.unwrap();
        let ids: Vec<Uuid> = registrations.iter().map(|r| r.registration.id).collect();
        assert!(ids == vec![second.id, first.id] || first.registered_at == second.registered_at);
    }

    #[tokio::test]
    async fn test_attendance_and_feedback_scoped_to_event() {
        let store = MemoryStore::new();
        let college = seed_college(&store, "MIT").await;
        let talk = seed_event(&store, &college, "Talk", 3).await;
        let lab = seed_event(&store, &college, "Lab", 4).await;
        let student = seed_student(&store, &college, "Dana").await;
        let at_talk = seed_registration(&store, &talk, &student).await;
        let at_lab = seed_registration(&store, &lab, &student).await;
        store
            .mark_attendance(MarkAttendanceRequest { registration_id: at_talk.id, attended: true })
            .await
            .unwrap();
        store
            .mark_attendance(MarkAttendanceRequest { registration_id: at_lab.id, attended: false })
            .await
            .unwrap();
        store
            .submit_feedback(SubmitFeedbackRequest {
                registration_id: at_talk.id,
                rating: 5,
                comment: Some("Great".to_string()),
            })
            .await
            .unwrap();

        let attendance = store.attendance_for_event(talk.id).await.unwrap();
        assert_eq!(attendance.len(), 1);
        assert!(attendance[0].attendance.attended);
        assert_eq!(attendance[0].registration.student, student);

        assert_eq!(store.feedback_for_event(talk.id).await.unwrap().len(), 1);
        assert!(store.feedback_for_event(lab.id).await.unwrap().is_empty());
        assert!(store.attendance_for_event(Uuid::new_v4()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_attendance_changes_reports() {
        let store = MemoryStore::new();
        let college = seed_college(&store, "MIT").await;
        let event = seed_event(&store, &college, "Hackathon", 5).await;
        let student = seed_student(&store, &college, "Eli").await;
        let registration = seed_registration(&store, &event, &student).await;
        let attendance = store
            .mark_attendance(MarkAttendanceRequest { registration_id: registration.id, attended: false })
            .await
            .unwrap();

        assert_eq!(store.event_attendance_stats().await.unwrap()[0].attendance_percentage, 0);

        let updated = store.update_attendance(attendance.id, true).await.unwrap().expect("exists");
        assert!(updated.attended);
        assert!(updated.marked_at >= attendance.marked_at);
        assert_eq!(store.event_attendance_stats().await.unwrap()[0].attendance_percentage, 100);
        assert_eq!(store.top_active_students().await.unwrap()[0].events_attended, 1);
    }
}
