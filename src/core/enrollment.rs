//! Enrollment manager
//!
//! The only writer of the Student <-> Course relation. Both sides are updated
//! in the same call so a student's course list and a course's roster always
//! agree.

use crate::core::error::{RecordsError, Result};
use crate::core::registry::Registry;
use logger::{debug, info};
use std::collections::HashSet;

/// Outcome of a successful [`enroll`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enrollment {
    /// The student was added to the course
    Enrolled,
    /// The student was already enrolled; nothing changed
    AlreadyEnrolled,
}

/// Outcome of a successful [`withdraw`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Withdrawal {
    /// The student was removed from the course
    Withdrawn,
    /// The student was not enrolled; nothing changed
    NotEnrolled,
}

/// Prerequisites of `course_id` that are not among the student's current courses
///
/// Only present enrollment counts: a course taken and later withdrawn from
/// does not satisfy a prerequisite.
///
/// # Errors
/// Returns `NotFound` if the student or course does not exist
pub fn missing_prerequisites(
    registry: &Registry,
    student_id: &str,
    course_id: &str,
) -> Result<Vec<String>> {
    let student = registry.student(student_id)?;
    let course = registry.course(course_id)?;

    let enrolled: HashSet<&str> = student.courses().iter().map(String::as_str).collect();
    Ok(course
        .prerequisites
        .iter()
        .filter(|p| !enrolled.contains(p.as_str()))
        .cloned()
        .collect())
}

/// Enroll a student in a course
///
/// Prerequisites are checked against the student's enrollment at this instant,
/// before the already-enrolled check. On success the course is appended to the
/// student's list, the student to the course roster, and an empty attendance
/// log is created for the course if none exists.
///
/// # Errors
/// Returns `NotFound` if either identifier is absent, `PrerequisiteNotMet` if
/// any prerequisite is not currently enrolled
pub fn enroll(registry: &mut Registry, student_id: &str, course_id: &str) -> Result<Enrollment> {
    let missing = missing_prerequisites(registry, student_id, course_id)?;
    if !missing.is_empty() {
        debug!("Enrollment of {student_id} in {course_id} blocked by {missing:?}");
        return Err(RecordsError::PrerequisiteNotMet {
            student_id: student_id.to_string(),
            course_id: course_id.to_string(),
            missing,
        });
    }

    if registry.student(student_id)?.is_enrolled(course_id) {
        debug!("Student {student_id} already enrolled in {course_id}");
        return Ok(Enrollment::AlreadyEnrolled);
    }

    let course = registry.course_mut(course_id)?;
    if !course.students.iter().any(|s| s == student_id) {
        course.students.push(student_id.to_string());
    }

    let student = registry.student_mut(student_id)?;
    student.courses.push(course_id.to_string());
    student
        .attendance
        .entry(course_id.to_string())
        .or_default();

    info!("Student {student_id} enrolled in course {course_id}");
    Ok(Enrollment::Enrolled)
}

/// Withdraw a student from a course, removing both sides of the relation
///
/// Grades and attendance for the course are kept on the student's record.
///
/// # Errors
/// Returns `NotFound` if either identifier is absent
pub fn withdraw(registry: &mut Registry, student_id: &str, course_id: &str) -> Result<Withdrawal> {
    registry.require_pair(student_id, course_id)?;

    let course = registry.course_mut(course_id)?;
    let roster_before = course.students.len();
    course.students.retain(|s| s != student_id);
    let removed_from_roster = course.students.len() != roster_before;

    let student = registry.student_mut(student_id)?;
    let courses_before = student.courses.len();
    student.courses.retain(|c| c != course_id);
    let removed_from_student = student.courses.len() != courses_before;

    if removed_from_roster || removed_from_student {
        info!("Student {student_id} removed from course {course_id}");
        Ok(Withdrawal::Withdrawn)
    } else {
        debug!("Student {student_id} was not enrolled in {course_id}");
        Ok(Withdrawal::NotEnrolled)
    }
}
