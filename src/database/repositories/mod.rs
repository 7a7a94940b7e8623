//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod college;
pub mod event;
pub mod student;
pub mod registration;
pub mod attendance;
pub mod report;

// Re-export repositories
pub use college::CollegeRepository;
pub use event::EventRepository;
pub use student::StudentRepository;
pub use registration::RegistrationRepository;
pub use attendance::AttendanceRepository;
pub use report::ReportRepository;
