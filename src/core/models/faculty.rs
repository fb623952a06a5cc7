//! Faculty model

use super::Weekday;
use std::collections::BTreeMap;

/// Represents a faculty member
#[derive(Debug, Clone, PartialEq)]
pub struct Faculty {
    /// Unique faculty identifier (e.g., "F10")
    pub id: String,

    /// Full name
    pub name: String,

    /// Assigned course identifiers (mirrors `Course::faculty`)
    pub(crate) courses: Vec<String>,

    /// Available times per teaching day
    pub availability: BTreeMap<Weekday, Vec<String>>,

    /// Latest performance rating
    pub performance_rating: f64,

    /// Student feedback, oldest first
    pub feedback: Vec<String>,
}

impl Faculty {
    /// Create a new faculty member with empty availability for every teaching day
    #[must_use]
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            courses: Vec::new(),
            availability: Weekday::ALL.into_iter().map(|d| (d, Vec::new())).collect(),
            performance_rating: 0.0,
            feedback: Vec::new(),
        }
    }

    /// Assigned course identifiers
    #[must_use]
    pub fn courses(&self) -> &[String] {
        &self.courses
    }

    /// Replace the available times for one day
    pub fn set_availability(&mut self, day: Weekday, times: Vec<String>) {
        self.availability.insert(day, times);
    }

    /// Append a piece of student feedback
    pub fn add_feedback(&mut self, feedback: String) {
        self.feedback.push(feedback);
    }

    /// Overwrite the performance rating
    pub fn update_performance_rating(&mut self, rating: f64) {
        self.performance_rating = rating;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_faculty_creation() {
        let faculty = Faculty::new("F1".to_string(), "Grace Hopper".to_string());

        assert_eq!(faculty.availability.len(), 5);
        assert!(faculty.availability.values().all(Vec::is_empty));
        assert!(faculty.courses().is_empty());
        assert!(faculty.performance_rating.abs() < f64::EPSILON);
        assert!(faculty.feedback.is_empty());
    }

    #[test]
    fn test_set_availability_replaces() {
        let mut faculty = Faculty::new("F1".to_string(), "Grace Hopper".to_string());

        faculty.set_availability(Weekday::Tuesday, vec!["09:00".to_string()]);
        faculty.set_availability(
            Weekday::Tuesday,
            vec!["13:00".to_string(), "15:00".to_string()],
        );

        assert_eq!(
            faculty.availability[&Weekday::Tuesday],
            vec!["13:00".to_string(), "15:00".to_string()]
        );
    }

    #[test]
    fn test_feedback_and_rating() {
        let mut faculty = Faculty::new("F1".to_string(), "Grace Hopper".to_string());

        faculty.add_feedback("Clear lectures".to_string());
        faculty.add_feedback("Fair exams".to_string());
        faculty.update_performance_rating(4.5);

        assert_eq!(faculty.feedback.len(), 2);
        assert_eq!(faculty.feedback[0], "Clear lectures");
        assert!((faculty.performance_rating - 4.5).abs() < f64::EPSILON);
    }
}
