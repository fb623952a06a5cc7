//! Academic record tracker: grades, attendance, GPA

use crate::core::error::Result;
use crate::core::registry::Registry;
use chrono::NaiveDate;
use logger::{info, warn};

/// Outcome of a successful [`mark_attendance`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceMark {
    /// First value recorded for this course and date
    Recorded,
    /// An earlier value for this course and date was replaced
    Overwritten {
        /// The value that was replaced
        previous: bool,
    },
}

/// Record a grade and recompute the student's GPA
///
/// Grades may be recorded for any existing course; re-recording replaces the
/// earlier grade. Returns the new GPA.
///
/// # Errors
/// Returns `NotFound` if the student or course does not exist
pub fn record_grade(
    registry: &mut Registry,
    student_id: &str,
    course_id: &str,
    grade: f64,
) -> Result<f64> {
    registry.require_pair(student_id, course_id)?;

    registry
        .student_mut(student_id)?
        .grades
        .insert(course_id.to_string(), grade);

    let gpa = compute_gpa(registry, student_id)?;
    registry.student_mut(student_id)?.gpa = gpa;

    info!("Grade {grade} recorded for {student_id} in {course_id}");
    Ok(gpa)
}

/// Credit-weighted GPA of a student from the current registry state
///
/// `Σ(grade × credits)` over every graded course divided by `Σ credits` over
/// every currently enrolled course, graded or not. An ungraded enrolled course
/// therefore pulls the GPA down. Returns 0 when the student has no enrolled
/// credits.
///
/// # Errors
/// Returns `NotFound` if the student does not exist
pub fn compute_gpa(registry: &Registry, student_id: &str) -> Result<f64> {
    let student = registry.student(student_id)?;

    let total_points: f64 = student
        .grades()
        .iter()
        .filter_map(|(course_id, grade)| {
            registry
                .course(course_id)
                .ok()
                .map(|course| grade * f64::from(course.credits))
        })
        .sum();

    let total_credits: u32 = student
        .courses()
        .iter()
        .filter_map(|course_id| registry.course(course_id).ok())
        .map(|course| course.credits)
        .sum();

    if total_credits == 0 {
        Ok(0.0)
    } else {
        Ok(total_points / f64::from(total_credits))
    }
}

/// Mark a student present or absent on a date
///
/// Last write wins: an existing value for the same course and date is replaced
/// and a warning advisory is logged.
///
/// # Errors
/// Returns `NotFound` if the student or course does not exist
pub fn mark_attendance(
    registry: &mut Registry,
    student_id: &str,
    course_id: &str,
    date: NaiveDate,
    present: bool,
) -> Result<AttendanceMark> {
    registry.require_pair(student_id, course_id)?;

    let log = registry
        .student_mut(student_id)?
        .attendance
        .entry(course_id.to_string())
        .or_default();

    match log.insert(date, present) {
        Some(previous) => {
            warn!("Overwriting existing attendance record for {student_id} in {course_id} on {date}");
            Ok(AttendanceMark::Overwritten { previous })
        }
        None => {
            info!("Attendance marked for {student_id} in {course_id} on {date}");
            Ok(AttendanceMark::Recorded)
        }
    }
}

/// Percentage of recorded days the student was present, 0 when none are recorded
///
/// # Errors
/// Returns `NotFound` if the student or course does not exist
pub fn attendance_percentage(registry: &Registry, student_id: &str, course_id: &str) -> Result<f64> {
    registry.require_pair(student_id, course_id)?;

    let Some(log) = registry.student(student_id)?.attendance(course_id) else {
        return Ok(0.0);
    };
    if log.is_empty() {
        return Ok(0.0);
    }

    let present = log.values().filter(|p| **p).count();
    #[allow(clippy::cast_precision_loss)]
    let percentage = present as f64 / log.len() as f64 * 100.0;
    Ok(percentage)
}
