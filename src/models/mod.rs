//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod college;
pub mod event;
pub mod student;
pub mod registration;
pub mod report;

// Re-export commonly used models
pub use college::{College, CreateCollegeRequest, UpdateCollegeRequest};
pub use event::{Event, EventWithCollege, CreateEventRequest, UpdateEventRequest};
pub use student::{Student, StudentWithCollege, CreateStudentRequest, UpdateStudentRequest};
pub use registration::{
    Registration, RegistrationWithDetails, RegistrationWithStudent, CreateRegistrationRequest,
    Attendance, AttendanceWithRegistration, MarkAttendanceRequest, UpdateAttendanceRequest,
    Feedback, FeedbackWithRegistration, SubmitFeedbackRequest,
};
pub use report::{
    RegistrationStat, AttendanceStat, FeedbackStat, PopularityEntry, ParticipationEntry,
    DashboardStats,
};
