//! End-to-end workflows over the records engine's public API

use chrono::NaiveDate;
use uni_records::core::analytics::{graduation_rate, retention_rate};
use uni_records::core::enrollment::{enroll, withdraw, Enrollment, Withdrawal};
use uni_records::core::models::{Weekday, WeeklySchedule};
use uni_records::core::notify::RecordingNotifier;
use uni_records::core::records::{attendance_percentage, compute_gpa, mark_attendance, record_grade};
use uni_records::core::scheduling::{build_global_schedule, update_schedule};
use uni_records::core::{EntityKind, RecordsError, Registry};

fn schedule(pairs: &[(Weekday, &str)]) -> WeeklySchedule {
    pairs
        .iter()
        .map(|(day, time)| (*day, (*time).to_string()))
        .collect()
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, day).unwrap()
}

/// Two students, an intro course, a calculus course and a course requiring both
fn campus() -> Registry {
    let mut registry = Registry::new();
    registry.add_student("S1", "Ada", "12 Lane").unwrap();
    registry.add_student("S2", "Alan", "7 Road").unwrap();
    registry
        .add_course(
            "CS101",
            "Intro",
            3,
            schedule(&[(Weekday::Monday, "10:00")]),
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
    registry
        .add_course(
            "CS201",
            "Data Structures",
            4,
            schedule(&[(Weekday::Thursday, "14:00")]),
            vec!["CS101".to_string(), "MATH101".to_string()],
        )
        .unwrap();
    registry
}

fn assert_symmetric(registry: &Registry) {
    for student in registry.students() {
        for course_id in student.courses() {
            let course = registry.course(course_id).unwrap();
            assert!(course.students().contains(&student.id));
        }
    }
    for course in registry.courses() {
        for student_id in course.students() {
            assert!(registry.student(student_id).unwrap().is_enrolled(&course.id));
        }
    }
}

#[test]
fn enroll_twice_is_idempotent() {
    let mut registry = campus();

    assert_eq!(enroll(&mut registry, "S1", "CS101").unwrap(), Enrollment::Enrolled);
    let roster = registry.course("CS101").unwrap().students().to_vec();
    assert_eq!(
        enroll(&mut registry, "S1", "CS101").unwrap(),
        Enrollment::AlreadyEnrolled
    );

    assert_eq!(registry.course("CS101").unwrap().students(), roster.as_slice());
    assert_eq!(registry.student("S1").unwrap().courses(), ["CS101"]);
    assert_symmetric(&registry);
}

#[test]
fn prerequisites_are_checked_against_current_enrollment() {
    let mut registry = campus();
    enroll(&mut registry, "S1", "CS101").unwrap();

    assert_eq!(
        enroll(&mut registry, "S1", "CS201").unwrap_err(),
        RecordsError::PrerequisiteNotMet {
            student_id: "S1".to_string(),
            course_id: "CS201".to_string(),
            missing: vec!["MATH101".to_string()],
        }
    );
    assert!(registry.course("CS201").unwrap().students().is_empty());

    enroll(&mut registry, "S1", "MATH101").unwrap();
    assert_eq!(enroll(&mut registry, "S1", "CS201").unwrap(), Enrollment::Enrolled);

    // Withdrawing from a prerequisite means it no longer counts
    withdraw(&mut registry, "S1", "CS101").unwrap();
    withdraw(&mut registry, "S1", "CS201").unwrap();
    assert!(matches!(
        enroll(&mut registry, "S1", "CS201"),
        Err(RecordsError::PrerequisiteNotMet { .. })
    ));
    assert_symmetric(&registry);
}

#[test]
fn gpa_counts_ungraded_enrolled_credits() {
    let mut registry = campus();
    enroll(&mut registry, "S1", "CS101").unwrap();
    enroll(&mut registry, "S1", "MATH101").unwrap();

    let gpa = record_grade(&mut registry, "S1", "CS101", 90.0).unwrap();

    assert!((gpa - 270.0 / 7.0).abs() < 1e-9);
    assert!((gpa - 38.57).abs() < 0.01);
    assert!((registry.student("S1").unwrap().gpa() - gpa).abs() < f64::EPSILON);
    assert!((compute_gpa(&registry, "S1").unwrap() - gpa).abs() < f64::EPSILON);
}

#[test]
fn attendance_percentages() {
    let mut registry = campus();
    enroll(&mut registry, "S1", "CS101").unwrap();

    assert!(attendance_percentage(&registry, "S1", "CS101").unwrap().abs() < f64::EPSILON);

    for day in 2..=4 {
        mark_attendance(&mut registry, "S1", "CS101", date(day), true).unwrap();
    }
    assert!((attendance_percentage(&registry, "S1", "CS101").unwrap() - 100.0).abs() < f64::EPSILON);

    mark_attendance(&mut registry, "S1", "CS101", date(5), false).unwrap();
    assert!((attendance_percentage(&registry, "S1", "CS101").unwrap() - 75.0).abs() < f64::EPSILON);
}

#[test]
fn conflicting_schedule_update_changes_nothing() {
    let mut registry = campus();
    enroll(&mut registry, "S1", "MATH101").unwrap();
    let before = registry.course("MATH101").unwrap().schedule().clone();
    let mut sink = RecordingNotifier::new();

    let result = update_schedule(
        &mut registry,
        "MATH101",
        schedule(&[(Weekday::Friday, "08:00"), (Weekday::Monday, "10:00")]),
        &mut sink,
    );

    assert!(matches!(result, Err(RecordsError::ScheduleConflict { .. })));
    assert_eq!(registry.course("MATH101").unwrap().schedule(), &before);
    assert!(sink.sent.is_empty());
}

#[test]
fn committed_schedule_update_notifies_each_enrolled_student_once() {
    let mut registry = campus();
    enroll(&mut registry, "S1", "MATH101").unwrap();
    enroll(&mut registry, "S2", "MATH101").unwrap();
    enroll(&mut registry, "S2", "CS101").unwrap();
    let mut sink = RecordingNotifier::new();

    let update = update_schedule(
        &mut registry,
        "MATH101",
        schedule(&[(Weekday::Wednesday, "09:00")]),
        &mut sink,
    )
    .unwrap();

    assert_eq!(update.notified, 2);
    assert_eq!(sink.sent.len(), 2);
    assert_eq!(sink.sent[0].student_name, "Ada");
    assert_eq!(sink.sent[1].student_name, "Alan");
    assert_eq!(
        build_global_schedule(&registry).course_at(Weekday::Wednesday, "09:00"),
        Some("Calculus")
    );
}

#[test]
fn rates_on_empty_registry_are_zero() {
    let registry = Registry::new();

    assert!(retention_rate(&registry).abs() < f64::EPSILON);
    assert!(graduation_rate(&registry).abs() < f64::EPSILON);
}

#[test]
fn withdraw_updates_both_sides() {
    let mut registry = campus();
    enroll(&mut registry, "S1", "CS101").unwrap();
    enroll(&mut registry, "S2", "CS101").unwrap();

    assert_eq!(withdraw(&mut registry, "S1", "CS101").unwrap(), Withdrawal::Withdrawn);

    assert!(!registry.student("S1").unwrap().is_enrolled("CS101"));
    assert_eq!(registry.course("CS101").unwrap().students(), ["S2"]);
    assert_eq!(
        withdraw(&mut registry, "S1", "CS101").unwrap(),
        Withdrawal::NotEnrolled
    );
    assert_symmetric(&registry);
}

#[test]
fn failed_operations_leave_registry_unchanged() {
    let mut registry = campus();

    assert_eq!(
        enroll(&mut registry, "S9", "CS101").unwrap_err(),
        RecordsError::not_found(EntityKind::Student, "S9")
    );
    assert_eq!(
        record_grade(&mut registry, "S1", "CS999", 3.0).unwrap_err(),
        RecordsError::not_found(EntityKind::Course, "CS999")
    );
    assert!(matches!(
        registry.add_student("S1", "Duplicate", "addr"),
        Err(RecordsError::DuplicateId { .. })
    ));

    assert_eq!(registry.student("S1").unwrap().name, "Ada");
    assert!(registry.student("S1").unwrap().grades().is_empty());
    assert_eq!(registry.student_count(), 2);
    assert!(registry.courses().all(|c| c.students().is_empty()));
}

#[test]
fn semester_rates() {
    let mut registry = campus();
    registry.add_student("S3", "Grace", "1 Hill").unwrap();
    enroll(&mut registry, "S1", "CS101").unwrap();
    enroll(&mut registry, "S2", "CS101").unwrap();
    record_grade(&mut registry, "S1", "CS101", 3.5).unwrap();
    record_grade(&mut registry, "S2", "CS101", 1.0).unwrap();

    assert!((retention_rate(&registry) - 200.0 / 3.0).abs() < 1e-9);
    assert!((graduation_rate(&registry) - 100.0 / 3.0).abs() < 1e-9);
}
