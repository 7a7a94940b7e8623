//! Reduction functions behind every report
//!
//! Each function groups rows by entity key and reduces them. Inputs are full
//! table snapshots; the output order follows input order wherever ties occur.

use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use crate::models::{
    Attendance, AttendanceStat, DashboardStats, Event, Feedback, FeedbackStat,
    ParticipationEntry, PopularityEntry, Registration, RegistrationStat, Student,
};

/// Number of events in the popularity report
pub const POPULARITY_LIMIT: usize = 10;

/// Number of students in the top active students report
pub const TOP_ACTIVE_LIMIT: usize = 3;

/// Percentage of `attended` over `total`, rounded half away from zero.
///
/// Returns 0 when `total` is 0.
pub fn attendance_percentage(attended: i64, total: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    ((attended as f64 / total as f64) * 100.0).round() as i64
}

/// Arithmetic mean of `count` ratings summing to `sum`; 0 when there are none
pub fn mean_rating(sum: i64, count: i64) -> f64 {
    if count <= 0 {
        return 0.0;
    }
    sum as f64 / count as f64
}

/// The first [`TOP_ACTIVE_LIMIT`] rows of a participation ranking
pub fn top_active(mut participation: Vec<ParticipationEntry>) -> Vec<ParticipationEntry> {
    participation.truncate(TOP_ACTIVE_LIMIT);
    participation
}

fn registrations_per_event(registrations: &[Registration]) -> HashMap<Uuid, i64> {
    let mut counts = HashMap::new();
    for registration in registrations {
        *counts.entry(registration.event_id).or_insert(0) += 1;
    }
    counts
}

fn attended_registrations(attendance: &[Attendance]) -> HashSet<Uuid> {
    attendance
        .iter()
        .filter(|a| a.attended)
        .map(|a| a.registration_id)
        .collect()
}

/// Registration count for every event, highest first
pub fn registration_stats(events: &[Event], registrations: &[Registration]) -> Vec<RegistrationStat> {
    let counts = registrations_per_event(registrations);
    let mut stats: Vec<RegistrationStat> = events
        .iter()
        .map(|event| RegistrationStat {
            event_id: event.id,
            event_name: event.name.clone(),
            total_registrations: counts.get(&event.id).copied().unwrap_or(0),
        })
        .collect();
    stats.sort_by(|a, b| b.total_registrations.cmp(&a.total_registrations));
    stats
}

/// Attendance percentage for every event with at least one registration
pub fn attendance_stats(
    events: &[Event],
    registrations: &[Registration],
    attendance: &[Attendance],
) -> Vec<AttendanceStat> {
    let attended = attended_registrations(attendance);
    let mut totals: HashMap<Uuid, (i64, i64)> = HashMap::new();
    for registration in registrations {
        let entry = totals.entry(registration.event_id).or_insert((0, 0));
        entry.0 += 1;
        if attended.contains(&registration.id) {
            entry.1 += 1;
        }
    }

    events
        .iter()
        .filter_map(|event| {
            let (total, attended) = totals.get(&event.id).copied()?;
            Some(AttendanceStat {
                event_id: event.id,
                event_name: event.name.clone(),
                attendance_percentage: attendance_percentage(attended, total),
            })
        })
        .collect()
}

/// Mean rating for every event with at least one feedback row
pub fn feedback_stats(
    events: &[Event],
    registrations: &[Registration],
    feedback: &[Feedback],
) -> Vec<FeedbackStat> {
    let event_of: HashMap<Uuid, Uuid> = registrations
        .iter()
        .map(|r| (r.id, r.event_id))
        .collect();
    let mut ratings: HashMap<Uuid, (i64, i64)> = HashMap::new();
    for row in feedback {
        if let Some(event_id) = event_of.get(&row.registration_id) {
            let entry = ratings.entry(*event_id).or_insert((0, 0));
            entry.0 += i64::from(row.rating);
            entry.1 += 1;
        }
    }

    events
        .iter()
        .filter_map(|event| {
            let (sum, count) = ratings.get(&event.id).copied()?;
            Some(FeedbackStat {
                event_id: event.id,
                event_name: event.name.clone(),
                average_rating: mean_rating(sum, count),
            })
        })
        .collect()
}

/// The [`POPULARITY_LIMIT`] most registered events
pub fn popularity_report(events: &[Event], registrations: &[Registration]) -> Vec<PopularityEntry> {
    registration_stats(events, registrations)
        .into_iter()
        .take(POPULARITY_LIMIT)
        .map(|stat| PopularityEntry {
            event_id: stat.event_id,
            event_name: stat.event_name,
            registrations: stat.total_registrations,
        })
        .collect()
}

/// Number of attended events for every student, highest first
pub fn participation_report(
    students: &[Student],
    registrations: &[Registration],
    attendance: &[Attendance],
) -> Vec<ParticipationEntry> {
    let attended = attended_registrations(attendance);
    let mut counts: HashMap<Uuid, i64> = HashMap::new();
    for registration in registrations.iter().filter(|r| attended.contains(&r.id)) {
        *counts.entry(registration.student_id).or_insert(0) += 1;
    }

    let mut report: Vec<ParticipationEntry> = students
        .iter()
        .map(|student| ParticipationEntry {
            student_id: student.id,
            student_name: student.name.clone(),
            events_attended: counts.get(&student.id).copied().unwrap_or(0),
        })
        .collect();
    report.sort_by(|a, b| b.events_attended.cmp(&a.events_attended));
    report
}

/// System-wide totals; rates are computed over all rows, not averaged per event
pub fn dashboard(
    events: &[Event],
    students: &[Student],
    registrations: &[Registration],
    attendance: &[Attendance],
    feedback: &[Feedback],
) -> DashboardStats {
    let attended = attended_registrations(attendance);
    let attended_count = registrations
        .iter()
        .filter(|r| attended.contains(&r.id))
        .count() as i64;
    let total_registrations = registrations.len() as i64;
    let rating_sum: i64 = feedback.iter().map(|f| i64::from(f.rating)).sum();

    DashboardStats {
        total_events: events.len() as i64,
        total_students: students.len() as i64,
        total_registrations,
        average_attendance_rate: attendance_percentage(attended_count, total_registrations),
        average_rating: mean_rating(rating_sum, feedback.len() as i64),
    }
}
