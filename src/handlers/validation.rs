//! Field-level request validation
//!
//! Create requests are checked in full; update requests only check the
//! fields they carry.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::*;
use crate::utils::errors::{CampusError, Result};

static EMAIL_PATTERN: OnceLock<Regex> = OnceLock::new();

fn email_pattern() -> &'static Regex {
    EMAIL_PATTERN.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("static email pattern"))
}

pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

fn non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CampusError::InvalidInput(format!("{} must not be empty", field)));
    }
    Ok(())
}

fn email(value: &str) -> Result<()> {
    if !is_valid_email(value) {
        return Err(CampusError::InvalidInput(format!("invalid email address: {}", value)));
    }
    Ok(())
}

fn capacity(value: i32) -> Result<()> {
    if value < 0 {
        return Err(CampusError::InvalidInput("maxCapacity must not be negative".to_string()));
    }
    Ok(())
}

pub fn college(request: &CreateCollegeRequest) -> Result<()> {
    non_empty("name", &request.name)
}

pub fn college_patch(request: &UpdateCollegeRequest) -> Result<()> {
    request.name.as_deref().map_or(Ok(()), |name| non_empty("name", name))
}

pub fn event(request: &CreateEventRequest) -> Result<()> {
    non_empty("name", &request.name)?;
    non_empty("type", &request.event_type)?;
    non_empty("createdBy", &request.created_by)?;
    capacity(request.max_capacity)
}

pub fn event_patch(request: &UpdateEventRequest) -> Result<()> {
    if let Some(name) = &request.name {
        non_empty("name", name)?;
    }
    if let Some(event_type) = &request.event_type {
        non_empty("type", event_type)?;
    }
    if let Some(created_by) = &request.created_by {
        non_empty("createdBy", created_by)?;
    }
    request.max_capacity.map_or(Ok(()), capacity)
}

pub fn student(request: &CreateStudentRequest) -> Result<()> {
    non_empty("name", &request.name)?;
    email(&request.email)
}

pub fn student_patch(request: &UpdateStudentRequest) -> Result<()> {
    if let Some(name) = &request.name {
        non_empty("name", name)?;
    }
    request.email.as_deref().map_or(Ok(()), email)
}

pub fn feedback(request: &SubmitFeedbackRequest) -> Result<()> {
    if !(1..=5).contains(&request.rating) {
        return Err(CampusError::InvalidInput(format!(
            "rating must be between 1 and 5, got {}",
            request.rating
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("alice@student.edu"));
        assert!(is_valid_email("a.b+c@mit.ac.uk"));
        assert!(!is_valid_email("alice"));
        assert!(!is_valid_email("alice@edu"));
        assert!(!is_valid_email("al ice@student.edu"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_blank_names_rejected() {
        let request = CreateCollegeRequest { name: "   ".to_string() };
        assert_matches!(college(&request), Err(CampusError::InvalidInput(_)));
    }

    #[test]
    fn test_event_rules() {
        let mut request = CreateEventRequest {
            college_id: Uuid::new_v4(),
            name: "AI Workshop".to_string(),
            event_type: "Workshop".to_string(),
            description: None,
            date: Utc::now(),
            max_capacity: 0,
            created_by: "Dr. Sarah Johnson".to_string(),
        };
        assert!(event(&request).is_ok());

        request.max_capacity = -1;
        assert_matches!(event(&request), Err(CampusError::InvalidInput(_)));
    }

    #[test]
    fn test_patches_check_present_fields_only() {
        assert!(event_patch(&UpdateEventRequest::default()).is_ok());
        assert!(student_patch(&UpdateStudentRequest::default()).is_ok());

        let bad_email = UpdateStudentRequest { email: Some("nope".to_string()), ..Default::default() };
        assert_matches!(student_patch(&bad_email), Err(CampusError::InvalidInput(_)));

        let blank = UpdateCollegeRequest { name: Some(String::new()) };
        assert_matches!(college_patch(&blank), Err(CampusError::InvalidInput(_)));
    }

    #[test]
    fn test_rating_bounds() {
        let submit = |rating| SubmitFeedbackRequest { registration_id: Uuid::new_v4(), rating, comment: None };
        assert!(feedback(&submit(1)).is_ok());
        assert!(feedback(&submit(5)).is_ok());
        assert_matches!(feedback(&submit(0)), Err(CampusError::InvalidInput(_)));
        assert_matches!(feedback(&submit(6)), Err(CampusError::InvalidInput(_)));
    }
}
