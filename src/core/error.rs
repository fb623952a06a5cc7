//! Error kinds reported by the records engine
//!
//! Every core operation either succeeds or returns one of these kinds with the
//! registry left exactly as it was before the call.

use crate::core::models::Weekday;
use std::fmt;
use thiserror::Error;

/// The kind of entity an identifier refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// A student record
    Student,
    /// A course record
    Course,
    /// A faculty record
    Faculty,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Student => write!(f, "Student"),
            Self::Course => write!(f, "Course"),
            Self::Faculty => write!(f, "Faculty"),
        }
    }
}

/// Errors surfaced by registry, enrollment, record and scheduling operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordsError {
    /// A referenced identifier is not in the registry.
    #[error("{kind} '{id}' not found")]
    NotFound {
        /// Kind of entity that was looked up
        kind: EntityKind,
        /// Identifier that was looked up
        id: String,
    },

    /// An entity with this identifier already exists.
    #[error("{kind} with ID '{id}' already exists")]
    DuplicateId {
        /// Kind of entity being created
        kind: EntityKind,
        /// Identifier that collided
        id: String,
    },

    /// Enrollment blocked because prerequisites are not currently enrolled.
    #[error(
        "student '{student_id}' does not meet prerequisites for course '{course_id}' (missing: {})",
        .missing.join(", ")
    )]
    PrerequisiteNotMet {
        /// Student attempting to enroll
        student_id: String,
        /// Course being enrolled in
        course_id: String,
        /// Prerequisites absent from the student's current enrollment
        missing: Vec<String>,
    },

    /// A schedule update collided with another course and was rolled back.
    #[error("scheduling conflict: {course_id} and {other_course_id} on {day} at {time}")]
    ScheduleConflict {
        /// Course whose schedule update was rejected
        course_id: String,
        /// Course already occupying the slot
        other_course_id: String,
        /// Day of the colliding slot
        day: Weekday,
        /// Time of the colliding slot
        time: String,
    },

    /// User-supplied text could not be turned into a typed value.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl RecordsError {
    /// Shorthand for a `NotFound` error
    pub fn not_found(kind: EntityKind, id: &str) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// Shorthand for an `InvalidInput` error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

/// Result alias used throughout the records engine
pub type Result<T> = std::result::Result<T, RecordsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = RecordsError::not_found(EntityKind::Student, "S42");
        assert_eq!(err.to_string(), "Student 'S42' not found");
    }

    #[test]
    fn test_prerequisite_message_lists_missing() {
        let err = RecordsError::PrerequisiteNotMet {
            student_id: "S1".to_string(),
            course_id: "CS201".to_string(),
            missing: vec!["CS101".to_string(), "MATH101".to_string()],
        };
        assert!(err.to_string().ends_with("(missing: CS101, MATH101)"));
    }

    #[test]
    fn test_schedule_conflict_message() {
        let err = RecordsError::ScheduleConflict {
            course_id: "CS101".to_string(),
            other_course_id: "MATH101".to_string(),
            day: Weekday::Monday,
            time: "10:00".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "scheduling conflict: CS101 and MATH101 on Monday at 10:00"
        );
    }
}
