//! Data models for `uni-records`

pub mod course;
pub mod faculty;
pub mod student;
pub mod weekday;

pub use course::Course;
pub use faculty::Faculty;
pub use student::{AttendanceLog, Student};
pub use weekday::{Weekday, WeeklySchedule};

/// Treat an empty or whitespace-only update value as absent
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
