//! Entity registry: the single owner of every student, course and faculty record

use crate::core::error::{EntityKind, RecordsError, Result};
use crate::core::ledger::Ledger;
use crate::core::models::{non_blank, Course, Faculty, Student, Weekday, WeeklySchedule};
use logger::{debug, info};
use std::collections::HashMap;

/// Owns all entities of the university, keyed by identifier in insertion order
///
/// Entities reference each other by identifier only. Other components take
/// the registry explicitly (`&Registry` or `&mut Registry`) for the duration
/// of one operation.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    students: Table<Student>,
    courses: Table<Course>,
    faculty: Table<Faculty>,
    ledger: Ledger,
}

/// Entities keyed by identifier, iterated in the order they were added
///
/// Entities are never removed, so `order` always lists exactly the keys of `by_id`.
#[derive(Debug, Clone)]
struct Table<T> {
    by_id: HashMap<String, T>,
    order: Vec<String>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            by_id: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<T> Table<T> {
    fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    fn insert(&mut self, id: &str, value: T) -> &T {
        self.order.push(id.to_string());
        self.by_id.entry(id.to_string()).or_insert(value)
    }

    fn get(&self, id: &str) -> Option<&T> {
        self.by_id.get(id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.by_id.get_mut(id)
    }

    fn values(&self) -> impl Iterator<Item = &T> {
        self.order.iter().filter_map(|id| self.by_id.get(id))
    }

    fn len(&self) -> usize {
        self.order.len()
    }
}

impl Registry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a student
    ///
    /// # Errors
    /// Returns `DuplicateId` if a student with `id` already exists
    pub fn add_student(&mut self, id: &str, name: &str, address: &str) -> Result<&Student> {
        if self.students.contains(id) {
            return Err(RecordsError::DuplicateId {
                kind: EntityKind::Student,
                id: id.to_string(),
            });
        }
        info!("Student {name} added ({id})");
        let student = Student::new(id.to_string(), name.to_string(), address.to_string());
        Ok(self.students.insert(id, student))
    }

    /// Add a course
    ///
    /// # Arguments
    /// * `id` - Unique course identifier
    /// * `name` - Course name
    /// * `credits` - Credit weight
    /// * `schedule` - Weekly meeting slots (not checked for conflicts here)
    /// * `prerequisites` - Prerequisite course identifiers (not checked for existence)
    ///
    /// # Errors
    /// Returns `DuplicateId` if a course with `id` already exists
    pub fn add_course(
        &mut self,
        id: &str,
        name: &str,
        credits: u32,
        schedule: WeeklySchedule,
        prerequisites: Vec<String>,
    ) -> Result<&Course> {
        if self.courses.contains(id) {
            return Err(RecordsError::DuplicateId {
                kind: EntityKind::Course,
                id: id.to_string(),
            });
        }
        info!("Course {name} added ({id}, {credits} credits)");
        let course = Course::new(
            id.to_string(),
            name.to_string(),
            credits,
            schedule,
            prerequisites,
        );
        Ok(self.courses.insert(id, course))
    }

    /// Add a faculty member
    ///
    /// # Errors
    /// Returns `DuplicateId` if a faculty member with `id` already exists
    pub fn add_faculty(&mut self, id: &str, name: &str) -> Result<&Faculty> {
        if self.faculty.contains(id) {
            return Err(RecordsError::DuplicateId {
                kind: EntityKind::Faculty,
                id: id.to_string(),
            });
        }
        info!("Faculty {name} added ({id})");
        let faculty = Faculty::new(id.to_string(), name.to_string());
        Ok(self.faculty.insert(id, faculty))
    }

    /// Look up a student
    ///
    /// # Errors
    /// Returns `NotFound` if no student has this identifier
    pub fn student(&self, id: &str) -> Result<&Student> {
        self.students
            .get(id)
            .ok_or_else(|| RecordsError::not_found(EntityKind::Student, id))
    }

    /// Look up a course
    ///
    /// # Errors
    /// Returns `NotFound` if no course has this identifier
    pub fn course(&self, id: &str) -> Result<&Course> {
        self.courses
            .get(id)
            .ok_or_else(|| RecordsError::not_found(EntityKind::Course, id))
    }

    /// Look up a faculty member
    ///
    /// # Errors
    /// Returns `NotFound` if no faculty member has this identifier
    pub fn faculty(&self, id: &str) -> Result<&Faculty> {
        self.faculty
            .get(id)
            .ok_or_else(|| RecordsError::not_found(EntityKind::Faculty, id))
    }

    pub(crate) fn student_mut(&mut self, id: &str) -> Result<&mut Student> {
        self.students
            .get_mut(id)
            .ok_or_else(|| RecordsError::not_found(EntityKind::Student, id))
    }

    pub(crate) fn course_mut(&mut self, id: &str) -> Result<&mut Course> {
        self.courses
            .get_mut(id)
            .ok_or_else(|| RecordsError::not_found(EntityKind::Course, id))
    }

    fn faculty_mut(&mut self, id: &str) -> Result<&mut Faculty> {
        self.faculty
            .get_mut(id)
            .ok_or_else(|| RecordsError::not_found(EntityKind::Faculty, id))
    }

    /// Ensure both a student and a course exist, student checked first
    pub(crate) fn require_pair(&self, student_id: &str, course_id: &str) -> Result<()> {
        self.student(student_id)?;
        self.course(course_id)?;
        Ok(())
    }

    /// All students in insertion order
    pub fn students(&self) -> impl Iterator<Item = &Student> {
        self.students.values()
    }

    /// All courses in insertion order
    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.courses.values()
    }

    /// Number of students
    #[must_use]
    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    /// Number of courses
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    /// Number of faculty members
    #[must_use]
    pub fn faculty_count(&self) -> usize {
        self.faculty.len()
    }

    /// Update a student's name and/or address
    ///
    /// Absent or blank values leave the field unchanged.
    ///
    /// # Errors
    /// Returns `NotFound` if the student does not exist
    pub fn update_student(
        &mut self,
        id: &str,
        name: Option<&str>,
        address: Option<&str>,
    ) -> Result<&Student> {
        let student = self.student_mut(id)?;
        student.update_details(name, address);
        info!("Student {id} details updated");
        Ok(student)
    }

    /// Change a course's name and/or credit weight
    ///
    /// A blank name leaves the name unchanged.
    /// Schedules are changed through [`crate::core::scheduling::update_schedule`]
    /// so that conflicts are always checked. Stored GPAs are not recomputed.
    ///
    /// # Errors
    /// Returns `NotFound` if the course does not exist
    pub fn modify_course(
        &mut self,
        id: &str,
        name: Option<&str>,
        credits: Option<u32>,
    ) -> Result<&Course> {
        let course = self.course_mut(id)?;
        if let Some(name) = non_blank(name) {
            course.name = name.to_string();
        }
        if let Some(credits) = credits {
            course.credits = credits;
        }
        info!("Course {id} modified");
        Ok(course)
    }

    /// Rename a faculty member; a blank name is ignored
    ///
    /// # Errors
    /// Returns `NotFound` if the faculty member does not exist
    pub fn update_faculty(&mut self, id: &str, name: Option<&str>) -> Result<&Faculty> {
        let faculty = self.faculty_mut(id)?;
        if let Some(name) = non_blank(name) {
            faculty.name = name.to_string();
        }
        info!("Faculty {id} updated");
        Ok(faculty)
    }

    /// Assign a faculty member to teach a course
    ///
    /// Keeps `Course::faculty` and `Faculty::courses` consistent: the course is
    /// removed from any previously assigned faculty member's list.
    ///
    /// # Errors
    /// Returns `NotFound` if either the course or the faculty member does not exist
    pub fn assign_faculty(&mut self, course_id: &str, faculty_id: &str) -> Result<()> {
        self.course(course_id)?;
        self.faculty(faculty_id)?;

        let previous = self.course_mut(course_id)?.faculty.replace(faculty_id.to_string());
        if let Some(previous) = previous.filter(|p| p != faculty_id) {
            if let Some(old) = self.faculty.get_mut(&previous) {
                old.courses.retain(|c| c != course_id);
                debug!("Unassigned course {course_id} from faculty {previous}");
            }
        }

        let faculty = self.faculty_mut(faculty_id)?;
        if !faculty.courses.iter().any(|c| c == course_id) {
            faculty.courses.push(course_id.to_string());
        }
        info!("Faculty {faculty_id} assigned to course {course_id}");
        Ok(())
    }

    /// Replace a faculty member's available times for one day
    ///
    /// # Errors
    /// Returns `NotFound` if the faculty member does not exist
    pub fn set_availability(
        &mut self,
        faculty_id: &str,
        day: Weekday,
        times: Vec<String>,
    ) -> Result<()> {
        self.faculty_mut(faculty_id)?.set_availability(day, times);
        info!("Availability set for faculty {faculty_id} on {day}");
        Ok(())
    }

    /// Record a performance rating together with one piece of feedback
    ///
    /// # Errors
    /// Returns `InvalidInput` for a non-finite rating, `NotFound` if the faculty member does not exist
    pub fn record_faculty_performance(
        &mut self,
        faculty_id: &str,
        rating: f64,
        feedback: &str,
    ) -> Result<()> {
        if !rating.is_finite() {
            return Err(RecordsError::invalid(format!(
                "performance rating must be a number, got {rating}"
            )));
        }
        let faculty = self.faculty_mut(faculty_id)?;
        faculty.update_performance_rating(rating);
        faculty.add_feedback(feedback.to_string());
        info!("Performance recorded for faculty {faculty_id}");
        Ok(())
    }

    /// Tuition and scholarship ledgers
    #[must_use]
    pub const fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Set the tuition fee for an existing course
    ///
    /// # Errors
    /// Returns `NotFound` if the course does not exist, `InvalidInput` for a non-finite fee
    pub fn set_tuition_fee(&mut self, course_id: &str, fee: f64) -> Result<()> {
        self.course(course_id)?;
        self.ledger.set_tuition_fee(course_id, fee)?;
        info!("Tuition fee for course {course_id} updated to {fee}");
        Ok(())
    }

    /// Allocate a scholarship to an existing student
    ///
    /// # Errors
    /// Returns `NotFound` if the student does not exist, `InvalidInput` for a non-finite amount
    pub fn set_scholarship(&mut self, student_id: &str, amount: f64) -> Result<()> {
        self.student(student_id)?;
        self.ledger.set_scholarship(student_id, amount)?;
        info!("Scholarship of {amount} allocated to student {student_id}");
        Ok(())
    }
}
