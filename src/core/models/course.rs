//! Course model

use super::{Weekday, WeeklySchedule};

/// Represents a course offered by the university
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    /// Unique course identifier (e.g., "CS101")
    pub id: String,

    /// Course name (e.g., "Introduction to Programming")
    pub name: String,

    /// Credit weight used in GPA computation
    pub credits: u32,

    /// Weekly meeting slots, at most one per day
    pub(crate) schedule: WeeklySchedule,

    /// Prerequisite course identifiers (not validated for existence)
    pub prerequisites: Vec<String>,

    /// Enrolled student identifiers (mirrors `Student::courses`)
    pub(crate) students: Vec<String>,

    /// Assigned faculty identifier, if any
    pub(crate) faculty: Option<String>,
}

impl Course {
    /// Create a new course with an empty roster and no faculty
    ///
    /// # Arguments
    /// * `id` - Unique course identifier
    /// * `name` - Course name
    /// * `credits` - Credit weight
    /// * `schedule` - Weekly meeting slots
    /// * `prerequisites` - Prerequisite course identifiers
    #[must_use]
    pub const fn new(
        id: String,
        name: String,
        credits: u32,
        schedule: WeeklySchedule,
        prerequisites: Vec<String>,
    ) -> Self {
        Self {
            id,
            name,
            credits,
            schedule,
            prerequisites,
            students: Vec::new(),
            faculty: None,
        }
    }

    /// Weekly meeting slots
    #[must_use]
    pub const fn schedule(&self) -> &WeeklySchedule {
        &self.schedule
    }

    /// Time slot on `day`, if the course meets that day
    #[must_use]
    pub fn slot(&self, day: Weekday) -> Option<&str> {
        self.schedule.get(&day).map(String::as_str)
    }

    /// Enrolled student identifiers
    #[must_use]
    pub fn students(&self) -> &[String] {
        &self.students
    }

    /// Assigned faculty identifier
    #[must_use]
    pub fn faculty(&self) -> Option<&str> {
        self.faculty.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_creation() {
        let mut schedule = WeeklySchedule::new();
        schedule.insert(Weekday::Monday, "10:00".to_string());

        let course = Course::new(
            "CS201".to_string(),
            "Data Structures".to_string(),
            4,
            schedule,
            vec!["CS101".to_string()],
        );

        assert_eq!(course.id, "CS201");
        assert_eq!(course.credits, 4);
        assert_eq!(course.slot(Weekday::Monday), Some("10:00"));
        assert_eq!(course.slot(Weekday::Tuesday), None);
        assert_eq!(course.prerequisites, vec!["CS101".to_string()]);
        assert!(course.students().is_empty());
        assert!(course.faculty().is_none());
    }
}
