//! Aggregation engine
//!
//! Derived statistics over events, students, registrations, attendance and
//! feedback. Nothing here is cached; every report is recomputed per call.

pub mod aggregate;

pub use aggregate::{attendance_percentage, mean_rating, top_active, POPULARITY_LIMIT, TOP_ACTIVE_LIMIT};
