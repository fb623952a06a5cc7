//! Student model

use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

/// Attendance for one course: date -> present
pub type AttendanceLog = BTreeMap<NaiveDate, bool>;

/// Represents a student and their academic record
///
/// The enrollment list, grades, attendance and GPA are only written by the
/// enrollment and record-tracking operations of this crate; outside callers
/// read them through accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    /// Unique student identifier (e.g., "S1001")
    pub id: String,

    /// Full name
    pub name: String,

    /// Mailing address
    pub address: String,

    /// Enrolled course identifiers, in enrollment order (mirrors `Course::students`)
    pub(crate) courses: Vec<String>,

    /// Numeric grade per course identifier
    pub(crate) grades: HashMap<String, f64>,

    /// Attendance per course identifier
    pub(crate) attendance: HashMap<String, AttendanceLog>,

    /// Credit-weighted GPA, recomputed whenever a grade is recorded
    pub(crate) gpa: f64,
}

impl Student {
    /// Create a new student with an empty record
    #[must_use]
    pub fn new(id: String, name: String, address: String) -> Self {
        Self {
            id,
            name,
            address,
            courses: Vec::new(),
            grades: HashMap::new(),
            attendance: HashMap::new(),
            gpa: 0.0,
        }
    }

    /// Replace name and/or address; `None` or a blank value leaves a field unchanged
    pub fn update_details(&mut self, name: Option<&str>, address: Option<&str>) {
        if let Some(name) = super::non_blank(name) {
            self.name = name.to_string();
        }
        if let Some(address) = super::non_blank(address) {
            self.address = address.to_string();
        }
    }

    /// Course identifiers the student is currently enrolled in
    #[must_use]
    pub fn courses(&self) -> &[String] {
        &self.courses
    }

    /// Whether the student is currently enrolled in `course_id`
    #[must_use]
    pub fn is_enrolled(&self, course_id: &str) -> bool {
        self.courses.iter().any(|c| c == course_id)
    }

    /// All recorded grades keyed by course identifier
    #[must_use]
    pub const fn grades(&self) -> &HashMap<String, f64> {
        &self.grades
    }

    /// Grade for one course, if recorded
    #[must_use]
    pub fn grade(&self, course_id: &str) -> Option<f64> {
        self.grades.get(course_id).copied()
    }

    /// Attendance log for one course, if any exists
    #[must_use]
    pub fn attendance(&self, course_id: &str) -> Option<&AttendanceLog> {
        self.attendance.get(course_id)
    }

    /// Current GPA
    #[must_use]
    pub const fn gpa(&self) -> f64 {
        self.gpa
    }
}
