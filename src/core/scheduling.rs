//! Scheduling engine
//!
//! Two conflict policies live here and are kept apart:
//! - [`build_global_schedule`] is best-effort: a slot that is already taken is
//!   skipped and reported, and the rest of the grid is still built.
//! - [`update_schedule`] is all-or-nothing: the first collision restores the
//!   course's previous schedule and nobody is notified.

use crate::core::error::{RecordsError, Result};
use crate::core::models::{Weekday, WeeklySchedule};
use crate::core::notify::NotificationSink;
use crate::core::registry::Registry;
use logger::{debug, info, warn};
use std::collections::BTreeMap;

/// A slot that could not be placed in the global grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotConflict {
    /// Course whose slot was skipped
    pub course_id: String,
    /// Name of the skipped course
    pub course_name: String,
    /// Day of the contested slot
    pub day: Weekday,
    /// Time of the contested slot
    pub time: String,
    /// Name of the course already holding the slot
    pub occupied_by: String,
}

/// University-wide timetable: for each teaching day, time slot -> course name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalSchedule {
    /// Grid with an entry for every teaching day, empty days included
    pub days: BTreeMap<Weekday, BTreeMap<String, String>>,
    /// Slots left out because another course got there first
    pub conflicts: Vec<SlotConflict>,
}

impl GlobalSchedule {
    /// Course name holding `time` on `day`
    #[must_use]
    pub fn course_at(&self, day: Weekday, time: &str) -> Option<&str> {
        self.days
            .get(&day)
            .and_then(|slots| slots.get(time))
            .map(String::as_str)
    }
}

/// Build the global timetable from every course, in registry order
///
/// The first course to claim a (day, time) slot keeps it. Later claimants are
/// reported as conflicts and processing carries on.
#[must_use]
pub fn build_global_schedule(registry: &Registry) -> GlobalSchedule {
    let mut days: BTreeMap<Weekday, BTreeMap<String, String>> = Weekday::ALL
        .into_iter()
        .map(|day| (day, BTreeMap::new()))
        .collect();
    let mut conflicts = Vec::new();

    for course in registry.courses() {
        for (day, time) in course.schedule() {
            let slots = days.entry(*day).or_default();
            if let Some(occupant) = slots.get(time) {
                warn!("Scheduling conflict: {} on {day} at {time}", course.name);
                conflicts.push(SlotConflict {
                    course_id: course.id.clone(),
                    course_name: course.name.clone(),
                    day: *day,
                    time: time.clone(),
                    occupied_by: occupant.clone(),
                });
            } else {
                slots.insert(time.clone(), course.name.clone());
            }
        }
    }

    GlobalSchedule { days, conflicts }
}

/// Result of a committed [`update_schedule`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleUpdate {
    /// The schedule that was replaced
    pub previous: WeeklySchedule,
    /// Number of students notified
    pub notified: usize,
}

/// Stages of a schedule update, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UpdateStage {
    Proposed,
    Validated,
    Committed,
    RolledBack,
}

/// First other course holding any (day, time) slot of `proposed`
///
/// Slots are checked in `proposed` order; for each slot the other courses are
/// scanned in registry order.
fn find_collision(
    registry: &Registry,
    course_id: &str,
    proposed: &WeeklySchedule,
) -> Option<(String, Weekday, String)> {
    proposed.iter().find_map(|(day, time)| {
        registry
            .courses()
            .filter(|other| other.id != course_id)
            .find(|other| other.slot(*day) == Some(time.as_str()))
            .map(|other| (other.id.clone(), *day, time.clone()))
    })
}

/// Replace a course's weekly schedule atomically
///
/// The new schedule is installed provisionally, then every (day, time) pair is
/// checked against all other courses. On the first collision the original
/// schedule is put back unchanged and `ScheduleConflict` is returned without
/// notifying anyone. Otherwise the change stands and every currently enrolled
/// student receives exactly one notification through `sink`.
///
/// # Errors
/// Returns `NotFound` if the course does not exist, `ScheduleConflict` if the
/// update was rolled back
pub fn update_schedule(
    registry: &mut Registry,
    course_id: &str,
    new_schedule: WeeklySchedule,
    sink: &mut dyn NotificationSink,
) -> Result<ScheduleUpdate> {
    let course = registry.course_mut(course_id)?;
    let previous = std::mem::replace(&mut course.schedule, new_schedule);
    debug!("Schedule update for {course_id}: {:?}", UpdateStage::Proposed);

    let proposed = registry.course(course_id)?.schedule().clone();
    if let Some((other_course_id, day, time)) = find_collision(registry, course_id, &proposed) {
        registry.course_mut(course_id)?.schedule = previous;
        debug!("Schedule update for {course_id}: {:?}", UpdateStage::RolledBack);
        warn!("Scheduling conflict: {course_id} and {other_course_id} on {day} at {time}");
        return Err(RecordsError::ScheduleConflict {
            course_id: course_id.to_string(),
            other_course_id,
            day,
            time,
        });
    }
    debug!("Schedule update for {course_id}: {:?}", UpdateStage::Validated);

    let course = registry.course(course_id)?;
    let message = format!("Schedule for {} has been updated.", course.name);
    let mut notified = 0;
    for student in course
        .students()
        .iter()
        .filter_map(|id| registry.student(id).ok())
    {
        sink.notify(&student.name, &message);
        notified += 1;
    }

    debug!("Schedule update for {course_id}: {:?}", UpdateStage::Committed);
    info!("Schedule updated for course {course_id}, {notified} student(s) notified");
    Ok(ScheduleUpdate { previous, notified })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::enrollment::enroll;
    use crate::core::error::EntityKind;
    use crate::core::notify::RecordingNotifier;

    fn schedule(pairs: &[(Weekday, &str)]) -> WeeklySchedule {
        pairs
            .iter()
            .map(|(day, time)| (*day, (*time).to_string()))
            .collect()
    }

    fn registry() -> Registry {
        let mut registry = Registry::new();
        registry
            .add_course(
                "CS101",
                "Intro",
                3,
                schedule(&[(Weekday::Monday, "10:00"), (Weekday::Wednesday, "10:00")]),
                vec![],
            )
            .unwrap();
        registry
            .add_course(
                "MATH101",
                "Calculus",
                4,
                schedule(&[(Weekday::Tuesday, "09:00")]),
                vec![],
            )
            .unwrap();
        registry.add_student("S1", "Ada", "12 Lane").unwrap();
        registry.add_student("S2", "Alan", "7 Road").unwrap();
        registry
    }

    #[test]
    fn test_global_schedule_has_every_weekday() {
        let grid = build_global_schedule(&Registry::new());

        assert_eq!(grid.days.len(), 5);
        assert!(grid.days.values().all(BTreeMap::is_empty));
        assert!(grid.conflicts.is_empty());
    }

    #[test]
    fn test_global_schedule_places_courses() {
        let grid = build_global_schedule(&registry());

        assert_eq!(grid.course_at(Weekday::Monday, "10:00"), Some("Intro"));
        assert_eq!(grid.course_at(Weekday::Wednesday, "10:00"), Some("Intro"));
        assert_eq!(grid.course_at(Weekday::Tuesday, "09:00"), Some("Calculus"));
        assert_eq!(grid.course_at(Weekday::Friday, "09:00"), None);
    }

    #[test]
    fn test_global_schedule_skips_and_reports_conflicts() {
        let mut registry = registry();
        registry
            .add_course(
                "PHYS101",
                "Physics",
                4,
                schedule(&[(Weekday::Monday, "10:00"), (Weekday::Thursday, "14:00")]),
                vec![],
            )
            .unwrap();

        logger::start_capture();
        let grid = build_global_schedule(&registry);
        let records = logger::take_captured();

        assert_eq!(grid.course_at(Weekday::Monday, "10:00"), Some("Intro"));
        assert_eq!(grid.course_at(Weekday::Thursday, "14:00"), Some("Physics"));
        assert_eq!(
            grid.conflicts,
            vec![SlotConflict {
                course_id: "PHYS101".to_string(),
                course_name: "Physics".to_string(),
                day: Weekday::Monday,
                time: "10:00".to_string(),
                occupied_by: "Intro".to_string(),
            }]
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, logger::Level::Warn);
    }

    #[test]
    fn test_update_commits_and_notifies_each_student_once() {
        let mut registry = registry();
        enroll(&mut registry, "S1", "MATH101").unwrap();
        enroll(&mut registry, "S2", "MATH101").unwrap();
        let mut sink = RecordingNotifier::new();

        let update = update_schedule(
            &mut registry,
            "MATH101",
            schedule(&[(Weekday::Thursday, "09:00"), (Weekday::Friday, "11:00")]),
            &mut sink,
        )
        .unwrap();

        assert_eq!(update.notified, 2);
        assert_eq!(update.previous, schedule(&[(Weekday::Tuesday, "09:00")]));
        assert_eq!(
            registry.course("MATH101").unwrap().schedule(),
            &schedule(&[(Weekday::Thursday, "09:00"), (Weekday::Friday, "11:00")])
        );
        let names: Vec<&str> = sink.sent.iter().map(|n| n.student_name.as_str()).collect();
        assert_eq!(names, vec!["Ada", "Alan"]);
        assert!(sink
            .sent
            .iter()
            .all(|n| n.message == "Schedule for Calculus has been updated."));
    }

    #[test]
    fn test_update_conflict_rolls_back_without_notifying() {
        let mut registry = registry();
        enroll(&mut registry, "S1", "MATH101").unwrap();
        let before = registry.course("MATH101").unwrap().schedule().clone();
        let mut sink = RecordingNotifier::new();

        let err = update_schedule(
            &mut registry,
            "MATH101",
            schedule(&[(Weekday::Monday, "08:00"), (Weekday::Wednesday, "10:00")]),
            &mut sink,
        )
        .unwrap_err();

        assert_eq!(
            err,
            RecordsError::ScheduleConflict {
                course_id: "MATH101".to_string(),
                other_course_id: "CS101".to_string(),
                day: Weekday::Wednesday,
                time: "10:00".to_string(),
            }
        );
        assert_eq!(registry.course("MATH101").unwrap().schedule(), &before);
        assert!(sink.sent.is_empty());
    }

    #[test]
    fn test_update_ignores_own_slots() {
        let mut registry = registry();
        let mut sink = RecordingNotifier::new();

        let update = update_schedule(
            &mut registry,
            "CS101",
            schedule(&[(Weekday::Monday, "10:00"), (Weekday::Friday, "10:00")]),
            &mut sink,
        )
        .unwrap();

        assert_eq!(update.notified, 0);
        assert_eq!(
            registry.course("CS101").unwrap().slot(Weekday::Friday),
            Some("10:00")
        );
    }

    #[test]
    fn test_update_to_empty_schedule_commits() {
        let mut registry = registry();
        let mut sink = RecordingNotifier::new();

        update_schedule(&mut registry, "CS101", WeeklySchedule::new(), &mut sink).unwrap();

        assert!(registry.course("CS101").unwrap().schedule().is_empty());
    }

    #[test]
    fn test_update_unknown_course() {
        let mut registry = registry();
        let mut sink = RecordingNotifier::new();

        assert_eq!(
            update_schedule(&mut registry, "CS999", WeeklySchedule::new(), &mut sink)
                .unwrap_err(),
            RecordsError::not_found(EntityKind::Course, "CS999")
        );
    }
}
