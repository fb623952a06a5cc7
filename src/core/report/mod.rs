//! Report generation
//!
//! Renders registry state into plain-text reports using `askama` templates
//! from `templates/`. Reports only read the registry.

use crate::core::models::Student;
use crate::core::records::attendance_percentage;
use crate::core::registry::Registry;
use askama::Template;
use std::fmt;
use std::str::FromStr;

/// Supported report kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Per-course rosters with grades and attendance
    Enrollment,
    /// Per-student GPA with grades and attendance
    Performance,
}

impl ReportKind {
    /// File stem used when a report is written to disk
    #[must_use]
    pub const fn file_stem(&self) -> &'static str {
        match self {
            Self::Enrollment => "enrollment_report",
            Self::Performance => "performance_report",
        }
    }

    /// Render this kind of report for `registry`
    ///
    /// # Errors
    /// Returns an error if template rendering fails
    pub fn render(&self, registry: &Registry) -> Result<String, askama::Error> {
        match self {
            Self::Enrollment => enrollment_report(registry),
            Self::Performance => performance_report(registry),
        }
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "enrollment" | "enrolment" | "courses" => Ok(Self::Enrollment),
            "performance" | "academic" | "students" => Ok(Self::Performance),
            _ => Err(format!("Unknown report kind: {s}")),
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enrollment => write!(f, "enrollment"),
            Self::Performance => write!(f, "performance"),
        }
    }
}

/// A student's standing in one enrolled course
#[derive(Debug, Clone, PartialEq)]
pub struct CourseStanding {
    /// Course identifier
    pub course_id: String,
    /// Course name
    pub course_name: String,
    /// Recorded grade, if any
    pub grade: Option<f64>,
    /// Attendance percentage
    pub attendance: f64,
}

impl CourseStanding {
    /// Grade as display text, "Not graded" when absent
    #[must_use]
    pub fn grade_label(&self) -> String {
        format_grade(self.grade)
    }
}

/// Standing in each course the student is currently enrolled in, in enrollment order
#[must_use]
pub fn course_standings(registry: &Registry, student: &Student) -> Vec<CourseStanding> {
    student
        .courses()
        .iter()
        .filter_map(|course_id| registry.course(course_id).ok())
        .map(|course| CourseStanding {
            course_id: course.id.clone(),
            course_name: course.name.clone(),
            grade: student.grade(&course.id),
            attendance: attendance_percentage(registry, &student.id, &course.id).unwrap_or(0.0),
        })
        .collect()
}

fn format_grade(grade: Option<f64>) -> String {
    grade.map_or_else(|| "Not graded".to_string(), |g| g.to_string())
}

struct RosterRow<'a> {
    name: &'a str,
    grade: String,
    attendance: String,
}

struct CourseSection<'a> {
    name: &'a str,
    faculty: &'a str,
    enrolled: usize,
    rows: Vec<RosterRow<'a>>,
}

#[derive(Template)]
#[template(path = "enrollment_report.txt")]
struct EnrollmentReport<'a> {
    student_count: usize,
    course_count: usize,
    faculty_count: usize,
    courses: Vec<CourseSection<'a>>,
}

struct StandingRow {
    name: String,
    grade: String,
    attendance: String,
}

struct StudentSection<'a> {
    name: &'a str,
    id: &'a str,
    gpa: String,
    rows: Vec<StandingRow>,
}

#[derive(Template)]
#[template(path = "performance_report.txt")]
struct PerformanceReport<'a> {
    students: Vec<StudentSection<'a>>,
}

/// Enrollment report: totals, then each course's faculty and roster
///
/// # Errors
/// Returns an error if template rendering fails
pub fn enrollment_report(registry: &Registry) -> Result<String, askama::Error> {
    let courses = registry
        .courses()
        .map(|course| {
            let faculty = course
                .faculty()
                .and_then(|id| registry.faculty(id).ok())
                .map_or("Not assigned", |f| f.name.as_str());
            let rows = course
                .students()
                .iter()
                .filter_map(|id| registry.student(id).ok())
                .map(|student| RosterRow {
                    name: &student.name,
                    grade: format_grade(student.grade(&course.id)),
                    attendance: format!(
                        "{:.2}",
                        attendance_percentage(registry, &student.id, &course.id).unwrap_or(0.0)
                    ),
                })
                .collect();
            CourseSection {
                name: &course.name,
                faculty,
                enrolled: course.students().len(),
                rows,
            }
        })
        .collect();

    EnrollmentReport {
        student_count: registry.student_count(),
        course_count: registry.course_count(),
        faculty_count: registry.faculty_count(),
        courses,
    }
    .render()
}

/// Academic performance report: each student's GPA and enrolled-course standing
///
/// # Errors
/// Returns an error if template rendering fails
pub fn performance_report(registry: &Registry) -> Result<String, askama::Error> {
    let students = registry
        .students()
        .map(|student| StudentSection {
            name: &student.name,
            id: &student.id,
            gpa: format!("{:.2}", student.gpa()),
            rows: course_standings(registry, student)
                .into_iter()
                .map(|standing| StandingRow {
                    grade: standing.grade_label(),
                    attendance: format!("{:.2}", standing.attendance),
                    name: standing.course_name,
                })
                .collect(),
        })
        .collect();

    PerformanceReport { students }.render()
}
