//! Registry-wide analytics

use crate::core::registry::Registry;

/// GPA at or above which a student counts toward the graduation rate
pub const GRADUATION_GPA: f64 = 2.0;

/// Percentage of `matching` over `total`, 0 when `total` is 0
#[allow(clippy::cast_precision_loss)]
fn percentage(matching: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        matching as f64 / total as f64 * 100.0
    }
}

/// Percentage of students currently enrolled in at least one course
#[must_use]
pub fn retention_rate(registry: &Registry) -> f64 {
    let active = registry
        .students()
        .filter(|s| !s.courses().is_empty())
        .count();
    percentage(active, registry.student_count())
}

/// Percentage of students whose stored GPA is at least [`GRADUATION_GPA`]
///
/// A point-in-time proxy: no graduation event is tracked.
#[must_use]
pub fn graduation_rate(registry: &Registry) -> f64 {
    let graduating = registry
        .students()
        .filter(|s| s.gpa() >= GRADUATION_GPA)
        .count();
    percentage(graduating, registry.student_count())
}
