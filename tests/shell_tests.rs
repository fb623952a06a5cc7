//! Integration tests driving the records shell with command scripts

use std::fs;
use std::io::BufReader;
use tempfile::TempDir;
use uni_records::core::models::Weekday;
use uni_records::shell::{RunSummary, Session};

const TERM_SCRIPT: &str = r#"
# Fall term setup
add-student S1 "Ada Lovelace" "12 Analytical Way"
add-student S2 "Alan Turing" "7 Bletchley Road"
add-course CS101 "Intro to Programming" 3 --schedule Monday=10:00,Wednesday=10:00
add-course MATH101 Calculus 4 --schedule Tuesday=09:00
add-course CS201 "Data Structures" 4 --schedule Thursday=14:00 --prereqs CS101,MATH101
add-faculty F1 "Grace Hopper"
assign-faculty CS101 F1

enroll S1 CS101
enroll S1 MATH101
enroll S1 CS201
enroll S2 CS201
grade S1 CS101 90
attend S1 CS101 2024-09-02 yes
attend S1 CS101 2024-09-04 no
"#;

fn run(script: &str) -> (Session<Vec<u8>>, RunSummary) {
    let mut session = Session::new(Vec::new());
    let summary = session.run(script.as_bytes(), None).unwrap();
    (session, summary)
}

fn text(session: &Session<Vec<u8>>) -> String {
    String::from_utf8_lossy(session.output()).into_owned()
}

#[test]
fn term_script_builds_registry() {
    let (session, summary) = run(TERM_SCRIPT);

    // S2 lacks the prerequisites for CS201
    assert_eq!(
        summary,
        RunSummary {
            commands: 14,
            failures: 1
        }
    );

    let registry = session.registry();
    assert_eq!(registry.student_count(), 2);
    assert_eq!(registry.course_count(), 3);
    assert_eq!(registry.course("CS201").unwrap().students(), ["S1"]);
    assert_eq!(registry.course("CS101").unwrap().faculty(), Some("F1"));
    assert_eq!(registry.faculty("F1").unwrap().courses(), ["CS101"]);
    assert_eq!(
        registry.course("CS201").unwrap().prerequisites,
        vec!["CS101", "MATH101"]
    );

    let out = text(&session);
    assert!(out.contains("✗ student 'S2' does not meet prerequisites for course 'CS201' (missing: CS101, MATH101)"));
    assert!(out.contains("✓ Grade 90 recorded for Ada Lovelace in Intro to Programming."));
}

#[test]
fn performance_and_gpa_commands() {
    let (session, _) = run(&format!("{TERM_SCRIPT}\nperformance S1\ngpa S1\n"));

    let out = text(&session);
    // 90 * 3 / (3 + 4 + 4)
    assert!(out.contains("Academic Performance for Ada Lovelace:\nGPA: 24.55\n"));
    assert!(out.contains("Course: Intro to Programming, Grade: 90, Attendance: 50.00%"));
    assert!(out.contains("Course: Calculus, Grade: Not graded, Attendance: 0.00%"));
    assert!(out.contains("GPA for Ada Lovelace: 24.55"));
}

#[test]
fn attendance_overwrite_is_reported() {
    let (session, summary) = run(&format!("{TERM_SCRIPT}\nattend S1 CS101 2024-09-04 yes\n"));

    assert_eq!(summary.failures, 1);
    let out = text(&session);
    assert!(out.contains("⚠ Overwriting existing attendance record for 2024-09-04 (was absent)"));
    let log = session
        .registry()
        .student("S1")
        .unwrap()
        .attendance("CS101")
        .unwrap();
    assert_eq!(log.len(), 2);
    assert!(log.values().all(|present| *present));
}

#[test]
fn schedule_update_conflict_is_rolled_back() {
    let (session, _) = run(&format!(
        "{TERM_SCRIPT}\nupdate-schedule MATH101 Friday=08:00,Monday=10:00\n"
    ));

    let out = text(&session);
    assert!(out.contains("✗ scheduling conflict: MATH101 and CS101 on Monday at 10:00"));
    assert!(!out.contains("Notification to"));
    assert_eq!(
        session.registry().course("MATH101").unwrap().slot(Weekday::Tuesday),
        Some("09:00")
    );
    assert_eq!(
        session.registry().course("MATH101").unwrap().slot(Weekday::Friday),
        None
    );
}

#[test]
fn schedule_update_commit_notifies() {
    let (session, _) = run(&format!("{TERM_SCRIPT}\nupdate-schedule CS101 Friday=10:00\n"));

    let out = text(&session);
    assert_eq!(out.matches("Notification to Ada Lovelace").count(), 1);
    assert!(out.contains("Schedule for Intro to Programming has been updated."));
    assert_eq!(
        session.registry().course("CS101").unwrap().slot(Weekday::Monday),
        None
    );
}

#[test]
fn global_schedule_reports_conflicts() {
    let script = format!(
        "{TERM_SCRIPT}\nadd-course PHYS101 Physics 4 --schedule Monday=10:00,Friday=13:00\nschedule\n"
    );
    let (session, _) = run(&script);

    let out = text(&session);
    assert!(out.contains(
        "⚠ Scheduling conflict: Physics on Monday at 10:00 (slot held by Intro to Programming)"
    ));
    assert!(out.contains("Generated Class Schedule:\nMonday:\n  10:00: Intro to Programming\n"));
    assert!(out.contains("Friday:\n  13:00: Physics\n"));
}

#[test]
fn reports_and_rates() {
    let (session, _) = run(&format!(
        "{TERM_SCRIPT}\nreport enrollment\nreport performance\nretention\ngraduation\n"
    ));

    let out = text(&session);
    assert!(out.contains("University Report:\nTotal Students: 2\nTotal Courses: 3\nTotal Faculty: 1"));
    assert!(out.contains("Course: Intro to Programming\nFaculty: Grace Hopper\nEnrolled Students: 1"));
    assert!(out.contains("Student: Alan Turing (ID: S2)\nGPA: 0.00"));
    assert!(out.contains("Current retention rate: 50.00%"));
    assert!(out.contains("Current graduation rate: 50.00%"));
}

#[test]
fn ledger_and_faculty_commands() {
    let script = format!(
        "{TERM_SCRIPT}
tuition CS101 1200.50
scholarship S1 500
tuition CS999 10
set-availability F1 Mon 09:00,13:00
rate-faculty F1 4.5 \"Clear lectures\"
rate-faculty F1 7 \"Too high\"
faculty-courses F1
show-course CS101
"
    );
    let (session, summary) = run(&script);

    assert_eq!(summary.failures, 3);
    let registry = session.registry();
    assert_eq!(registry.ledger().tuition_fee("CS101"), Some(1200.5));
    assert_eq!(registry.ledger().scholarship("S1"), Some(500.0));
    let faculty = registry.faculty("F1").unwrap();
    assert_eq!(faculty.availability[&Weekday::Monday], vec!["09:00", "13:00"]);
    assert!((faculty.performance_rating - 4.5).abs() < f64::EPSILON);
    assert_eq!(faculty.feedback, vec!["Clear lectures"]);

    let out = text(&session);
    assert!(out.contains("Courses assigned to Grace Hopper:\n- Intro to Programming (ID: CS101)"));
    assert!(out.contains("Schedule: Monday 10:00, Wednesday 10:00"));
    assert!(out.contains("Faculty: Grace Hopper"));
    assert!(out.contains("Tuition: 1200.5"));
}

#[test]
fn script_file_with_echo() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("term.txt");
    fs::write(&path, "add-student S1 Ada addr\nshow-student S1\nexit\nshow-student S1\n").unwrap();

    let mut session = Session::new(Vec::new()).with_echo(true);
    let file = fs::File::open(&path).unwrap();
    let summary = session.run(BufReader::new(file), None).unwrap();

    assert_eq!(summary.commands, 3);
    let out = text(&session);
    assert!(out.starts_with("> add-student S1 Ada addr\n✓ Student Ada added.\n> show-student S1\n"));
    assert_eq!(out.matches("Student ID: S1").count(), 1);
}

#[test]
fn prompt_is_written_before_each_line() {
    let mut session = Session::new(Vec::new());

    session.run("gpa S1\n".as_bytes(), Some("uni> ")).unwrap();

    let out = text(&session);
    assert!(out.starts_with("uni> ✗ Student 'S1' not found\nuni> "));
}
