//! Integration tests for logging through the crate's re-exported macros

use logger::{set_level, set_level_from_str, start_capture, take_captured, Level};
use uni_records::{debug, error, info, warn};

#[test]
fn level_parse_accepts_valid() {
    assert!(set_level_from_str("error"));
    assert!(set_level_from_str("warn"));
    assert!(set_level_from_str("info"));
    assert!(set_level_from_str("debug"));
}

#[test]
fn level_parse_rejects_invalid() {
    assert!(!set_level_from_str("invalid"));
    assert!(!set_level_from_str(""));
}

#[test]
fn logs_do_not_panic() {
    set_level(Level::Debug);
    info!("info integration");
    warn!("warn integration");
    error!("error integration");
    debug!("debug integration");
}

#[test]
fn attendance_overwrite_is_captured_as_warning() {
    use chrono::NaiveDate;
    use uni_records::core::models::WeeklySchedule;
    use uni_records::core::records::mark_attendance;
    use uni_records::core::Registry;

    let mut registry = Registry::new();
    registry.add_student("S1", "Ada", "addr").unwrap();
    registry
        .add_course("CS101", "Intro", 3, WeeklySchedule::new(), vec![])
        .unwrap();
    let day = NaiveDate::from_ymd_opt(2024, 9, 2).unwrap();
    mark_attendance(&mut registry, "S1", "CS101", day, true).unwrap();

    start_capture();
    mark_attendance(&mut registry, "S1", "CS101", day, false).unwrap();
    let records = take_captured();

    let warnings: Vec<_> = records.iter().filter(|r| r.level == Level::Warn).collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.starts_with("Overwriting existing attendance record"));
}
