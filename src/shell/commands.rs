//! Command grammar for the records shell

use super::parse::{
    parse_date, parse_number, parse_presence, parse_rating, parse_report_kind, parse_schedule,
    parse_weekday,
};
use crate::core::models::{Weekday, WeeklySchedule};
use crate::core::report::ReportKind;
use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};

/// One parsed shell line
#[derive(Parser, Debug)]
#[command(
    name = "unirecords",
    no_binary_name = true,
    disable_version_flag = true,
    color = clap::ColorChoice::Never,
    help_template = "Commands:\n{subcommands}"
)]
pub struct ShellLine {
    /// Command to run
    #[command(subcommand)]
    pub command: ShellCommand,
}

/// Commands understood by the shell
#[derive(Debug, Subcommand, PartialEq)]
pub enum ShellCommand {
    /// Register a new student
    AddStudent {
        /// Student id
        id: String,
        /// Full name
        name: String,
        /// Postal address
        address: String,
    },
    /// Change a student's name and/or address
    UpdateStudent {
        /// Student id
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New address
        #[arg(long)]
        address: Option<String>,
    },
    /// Show a student's profile
    ShowStudent {
        /// Student id
        id: String,
    },
    /// Create a new course
    AddCourse {
        /// Course id
        id: String,
        /// Course name
        name: String,
        /// Credit weight
        credits: u32,
        /// Weekly meetings, e.g. Monday=10:00,Wednesday=10:00
        #[arg(long, value_name = "DAY=TIME,..", value_parser = parse_schedule)]
        schedule: Option<WeeklySchedule>,
        /// Prerequisite course ids, comma separated
        #[arg(long, value_name = "IDS", value_delimiter = ',')]
        prereqs: Vec<String>,
    },
    /// Rename a course or change its credits
    ModifyCourse {
        /// Course id
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New credit weight
        #[arg(long)]
        credits: Option<u32>,
    },
    /// Show a course's details
    ShowCourse {
        /// Course id
        id: String,
    },
    /// Register a new faculty member
    AddFaculty {
        /// Faculty id
        id: String,
        /// Full name
        name: String,
    },
    /// Rename a faculty member
    UpdateFaculty {
        /// Faculty id
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
    },
    /// Assign a faculty member to teach a course
    AssignFaculty {
        /// Course id
        course_id: String,
        /// Faculty id
        faculty_id: String,
    },
    /// List the courses a faculty member teaches
    FacultyCourses {
        /// Faculty id
        id: String,
    },
    /// Set a faculty member's available times for one day
    SetAvailability {
        /// Faculty id
        id: String,
        /// Teaching day
        #[arg(value_parser = parse_weekday)]
        day: Weekday,
        /// Available times, comma separated (omit to clear the day)
        times: Option<String>,
    },
    /// Record a faculty performance rating with feedback
    RateFaculty {
        /// Faculty id
        id: String,
        /// Rating between 0 and 5
        #[arg(value_parser = parse_rating)]
        rating: f64,
        /// Feedback text
        feedback: String,
    },
    /// Enroll a student in a course
    Enroll {
        /// Student id
        student_id: String,
        /// Course id
        course_id: String,
    },
    /// Remove a student from a course
    Withdraw {
        /// Student id
        student_id: String,
        /// Course id
        course_id: String,
    },
    /// Record a grade and recompute GPA
    Grade {
        /// Student id
        student_id: String,
        /// Course id
        course_id: String,
        /// Grade points
        #[arg(value_parser = parse_number)]
        grade: f64,
    },
    /// Mark attendance for a date
    Attend {
        /// Student id
        student_id: String,
        /// Course id
        course_id: String,
        /// Date as YYYY-MM-DD
        #[arg(value_parser = parse_date)]
        date: NaiveDate,
        /// yes or no
        #[arg(action = ArgAction::Set, value_parser = parse_presence)]
        present: bool,
    },
    /// Show a student's GPA, grades and attendance
    Performance {
        /// Student id
        student_id: String,
    },
    /// Show a student's stored GPA
    Gpa {
        /// Student id
        student_id: String,
    },
    /// Build the university-wide class schedule
    Schedule,
    /// Replace a course's weekly schedule, rejecting conflicts
    UpdateSchedule {
        /// Course id
        course_id: String,
        /// Weekly meetings, e.g. Tuesday=09:00,Thursday=09:00 (or none)
        #[arg(value_parser = parse_schedule)]
        schedule: WeeklySchedule,
    },
    /// List every course's weekly timetable
    Timetable,
    /// Set the tuition fee for a course
    Tuition {
        /// Course id
        course_id: String,
        /// Fee amount
        #[arg(value_parser = parse_number, allow_negative_numbers = true)]
        fee: f64,
    },
    /// Allocate a scholarship to a student
    Scholarship {
        /// Student id
        student_id: String,
        /// Amount
        #[arg(value_parser = parse_number, allow_negative_numbers = true)]
        amount: f64,
    },
    /// Print a report (enrollment or performance)
    Report {
        /// Report kind
        #[arg(value_parser = parse_report_kind)]
        kind: ReportKind,
    },
    /// Show the retention rate
    Retention,
    /// Show the graduation rate
    Graduation,
    /// Leave the shell
    #[command(alias = "quit")]
    Exit,
}
