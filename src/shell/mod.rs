//! Interactive and scripted command shell over a [`Registry`]
//!
//! Each line is split into words, parsed into a [`ShellCommand`] and applied
//! to the session's registry. Output goes to any [`Write`] so the same
//! session drives a terminal, a script run or a test buffer.

pub mod commands;
pub mod parse;
pub mod tokenize;

pub use commands::{ShellCommand, ShellLine};

use crate::core::analytics::{graduation_rate, retention_rate};
use crate::core::enrollment::{enroll, withdraw, Enrollment, Withdrawal};
use crate::core::error::RecordsError;
use crate::core::models::{Weekday, WeeklySchedule};
use crate::core::notify::{LogNotifier, NotificationSink};
use crate::core::records::{mark_attendance, record_grade, AttendanceMark};
use crate::core::registry::Registry;
use crate::core::report::{course_standings, ReportKind};
use crate::core::scheduling::{build_global_schedule, update_schedule};
use clap::error::ErrorKind;
use clap::Parser;
use logger::debug;
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Failures while executing a single shell line
#[derive(Debug, Error)]
pub enum ShellError {
    /// The command was understood but the records engine refused it
    #[error(transparent)]
    Records(#[from] RecordsError),
    /// The line could not be parsed into a command
    #[error("{0}")]
    Usage(String),
    /// A report template failed to render
    #[error("report rendering failed: {0}")]
    Report(#[from] askama::Error),
    /// Writing output failed
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Whether the shell should keep reading lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next line
    Continue,
    /// Stop: `exit` or `quit` was entered
    Exit,
}

/// Totals for a batch of executed lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Commands executed, blank and comment lines excluded
    pub commands: usize,
    /// Commands that were rejected
    pub failures: usize,
}

/// Prints notifications to the session output and logs them
struct WriterNotifier<'a, W: Write> {
    out: &'a mut W,
    failed: Option<io::Error>,
}

impl<W: Write> NotificationSink for WriterNotifier<'_, W> {
    fn notify(&mut self, student_name: &str, message: &str) {
        LogNotifier.notify(student_name, message);
        if self.failed.is_none() {
            if let Err(e) = writeln!(self.out, "Notification to {student_name}: {message}") {
                self.failed = Some(e);
            }
        }
    }
}

/// A shell session owning one registry
pub struct Session<W: Write> {
    registry: Registry,
    out: W,
    echo: bool,
}

impl<W: Write> Session<W> {
    /// Start a session with an empty registry
    pub fn new(out: W) -> Self {
        Self::with_registry(Registry::new(), out)
    }

    /// Start a session over an existing registry
    pub const fn with_registry(registry: Registry, out: W) -> Self {
        Self {
            registry,
            out,
            echo: false,
        }
    }

    /// Echo each command line before its output
    #[must_use]
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// The session's registry
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The output writer
    pub fn output(&self) -> &W {
        &self.out
    }

    /// Execute one command line
    ///
    /// Rejected commands are reported on the output with a `✗` prefix and
    /// returned as `Err` so callers can count them; the registry is unchanged.
    ///
    /// # Errors
    /// Returns the rejection for commands that failed
    pub fn execute_line(&mut self, line: &str) -> Result<Flow, ShellError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Flow::Continue);
        }
        if self.echo {
            writeln!(self.out, "> {line}")?;
        }

        match self.parse_and_dispatch(line) {
            Ok(flow) => Ok(flow),
            Err(ShellError::Io(e)) => Err(ShellError::Io(e)),
            Err(e) => {
                debug!("Command rejected: {line}");
                writeln!(self.out, "✗ {e}")?;
                Err(e)
            }
        }
    }

    fn parse_and_dispatch(&mut self, line: &str) -> Result<Flow, ShellError> {
        let words = tokenize::split_line(line)?;
        match ShellLine::try_parse_from(&words) {
            Ok(parsed) => self.dispatch(parsed.command),
            Err(e) if e.kind() == ErrorKind::DisplayHelp => {
                write!(self.out, "{e}")?;
                Ok(Flow::Continue)
            }
            Err(e) => {
                let message = e.to_string();
                let message = message.trim_start_matches("error: ").trim_end();
                Err(ShellError::Usage(message.to_string()))
            }
        }
    }

    /// Execute lines from `input` until it ends or `exit` is entered
    ///
    /// `prompt` is written before each line when given. Rejected commands are
    /// counted and execution carries on with the next line.
    ///
    /// # Errors
    /// Returns an error if reading input or writing output fails
    pub fn run<R: BufRead>(&mut self, input: R, prompt: Option<&str>) -> io::Result<RunSummary> {
        let mut summary = RunSummary::default();
        let mut lines = input.lines();

        loop {
            if let Some(prompt) = prompt {
                write!(self.out, "{prompt}")?;
                self.out.flush()?;
            }
            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }

            summary.commands += 1;
            match self.execute_line(&line) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(ShellError::Io(e)) => return Err(e),
                Err(_) => summary.failures += 1,
            }
        }

        self.out.flush()?;
        Ok(summary)
    }

    #[allow(clippy::too_many_lines)]
    fn dispatch(&mut self, command: ShellCommand) -> Result<Flow, ShellError> {
        match command {
            ShellCommand::AddStudent { id, name, address } => {
                let student = self.registry.add_student(&id, &name, &address)?;
                writeln!(self.out, "✓ Student {} added.", student.name)?;
            }
            ShellCommand::UpdateStudent { id, name, address } => {
                self.registry
                    .update_student(&id, name.as_deref(), address.as_deref())?;
                writeln!(self.out, "✓ Student {id} details updated.")?;
            }
            ShellCommand::ShowStudent { id } => self.show_student(&id)?,
            ShellCommand::AddCourse {
                id,
                name,
                credits,
                schedule,
                prereqs,
            } => {
                let course = self.registry.add_course(
                    &id,
                    &name,
                    credits,
                    schedule.unwrap_or_default(),
                    prereqs,
                )?;
                writeln!(self.out, "✓ Course {} added.", course.name)?;
            }
            ShellCommand::ModifyCourse { id, name, credits } => {
                self.registry.modify_course(&id, name.as_deref(), credits)?;
                writeln!(self.out, "✓ Course {id} modified.")?;
            }
            ShellCommand::ShowCourse { id } => self.show_course(&id)?,
            ShellCommand::AddFaculty { id, name } => {
                let faculty = self.registry.add_faculty(&id, &name)?;
                writeln!(self.out, "✓ Faculty {} added.", faculty.name)?;
            }
            ShellCommand::UpdateFaculty { id, name } => {
                self.registry.update_faculty(&id, name.as_deref())?;
                writeln!(self.out, "✓ Faculty {id} updated.")?;
            }
            ShellCommand::AssignFaculty {
                course_id,
                faculty_id,
            } => {
                self.registry.assign_faculty(&course_id, &faculty_id)?;
                writeln!(
                    self.out,
                    "✓ Faculty {} assigned to course {}.",
                    self.registry.faculty(&faculty_id)?.name,
                    self.registry.course(&course_id)?.name
                )?;
            }
            ShellCommand::FacultyCourses { id } => self.faculty_courses(&id)?,
            ShellCommand::SetAvailability { id, day, times } => {
                self.registry
                    .set_availability(&id, day, parse::parse_list(times.as_deref().unwrap_or_default()))?;
                writeln!(
                    self.out,
                    "✓ Availability set for {} on {day}.",
                    self.registry.faculty(&id)?.name
                )?;
            }
            ShellCommand::RateFaculty {
                id,
                rating,
                feedback,
            } => {
                self.registry
                    .record_faculty_performance(&id, rating, &feedback)?;
                writeln!(
                    self.out,
                    "✓ Performance recorded for {}.",
                    self.registry.faculty(&id)?.name
                )?;
            }
            ShellCommand::Enroll {
                student_id,
                course_id,
            } => {
                let outcome = enroll(&mut self.registry, &student_id, &course_id)?;
                let (student, course) = self.names(&student_id, &course_id)?;
                match outcome {
                    Enrollment::Enrolled => writeln!(
                        self.out,
                        "✓ Student {student} enrolled in course {course}."
                    )?,
                    Enrollment::AlreadyEnrolled => writeln!(
                        self.out,
                        "✓ Student {student} is already enrolled in course {course}."
                    )?,
                }
            }
            ShellCommand::Withdraw {
                student_id,
                course_id,
            } => {
                let outcome = withdraw(&mut self.registry, &student_id, &course_id)?;
                let (student, course) = self.names(&student_id, &course_id)?;
                match outcome {
                    Withdrawal::Withdrawn => writeln!(
                        self.out,
                        "✓ Student {student} removed from course {course}."
                    )?,
                    Withdrawal::NotEnrolled => writeln!(
                        self.out,
                        "✓ Student {student} was not enrolled in course {course}."
                    )?,
                }
            }
            ShellCommand::Grade {
                student_id,
                course_id,
                grade,
            } => {
                let gpa = record_grade(&mut self.registry, &student_id, &course_id, grade)?;
                let (student, course) = self.names(&student_id, &course_id)?;
                writeln!(
                    self.out,
                    "✓ Grade {grade} recorded for {student} in {course}. GPA: {gpa:.2}"
                )?;
            }
            ShellCommand::Attend {
                student_id,
                course_id,
                date,
                present,
            } => {
                let mark =
                    mark_attendance(&mut self.registry, &student_id, &course_id, date, present)?;
                if let AttendanceMark::Overwritten { previous } = mark {
                    writeln!(
                        self.out,
                        "⚠ Overwriting existing attendance record for {date} (was {})",
                        presence_label(previous)
                    )?;
                }
                writeln!(
                    self.out,
                    "✓ Attendance marked for {student_id} in course {course_id} on {date}: {}.",
                    presence_label(present)
                )?;
            }
            ShellCommand::Performance { student_id } => self.performance(&student_id)?,
            ShellCommand::Gpa { student_id } => {
                let student = self.registry.student(&student_id)?;
                writeln!(self.out, "GPA for {}: {:.2}", student.name, student.gpa())?;
            }
            ShellCommand::Schedule => self.global_schedule()?,
            ShellCommand::UpdateSchedule {
                course_id,
                schedule,
            } => self.update_schedule(&course_id, schedule)?,
            ShellCommand::Timetable => self.timetable()?,
            ShellCommand::Tuition { course_id, fee } => {
                self.registry.set_tuition_fee(&course_id, fee)?;
                writeln!(
                    self.out,
                    "✓ Tuition fees for course {course_id} updated to: {fee}"
                )?;
            }
            ShellCommand::Scholarship { student_id, amount } => {
                self.registry.set_scholarship(&student_id, amount)?;
                writeln!(
                    self.out,
                    "✓ Scholarship of {amount} allocated to {}.",
                    self.registry.student(&student_id)?.name
                )?;
            }
            ShellCommand::Report { kind } => self.report(kind)?,
            ShellCommand::Retention => writeln!(
                self.out,
                "Current retention rate: {:.2}%",
                retention_rate(&self.registry)
            )?,
            ShellCommand::Graduation => writeln!(
                self.out,
                "Current graduation rate: {:.2}%",
                graduation_rate(&self.registry)
            )?,
            ShellCommand::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    fn names(&self, student_id: &str, course_id: &str) -> Result<(String, String), RecordsError> {
        Ok((
            self.registry.student(student_id)?.name.clone(),
            self.registry.course(course_id)?.name.clone(),
        ))
    }

    fn show_student(&mut self, id: &str) -> Result<(), ShellError> {
        let student = self.registry.student(id)?;
        let courses: Vec<&str> = student
            .courses()
            .iter()
            .filter_map(|c| self.registry.course(c).ok())
            .map(|c| c.name.as_str())
            .collect();

        writeln!(
            self.out,
            "Student ID: {}, Name: {}, Address: {}",
            student.id, student.name, student.address
        )?;
        writeln!(self.out, "Enrolled Courses: {}", none_if_empty(&courses.join(", ")))?;
        writeln!(self.out, "GPA: {:.2}", student.gpa())?;
        if let Some(amount) = self.registry.ledger().scholarship(id) {
            writeln!(self.out, "Scholarship: {amount}")?;
        }
        Ok(())
    }

    fn show_course(&mut self, id: &str) -> Result<(), ShellError> {
        let course = self.registry.course(id)?;
        let faculty = course
            .faculty()
            .and_then(|f| self.registry.faculty(f).ok())
            .map_or("Not assigned", |f| f.name.as_str());

        writeln!(self.out, "Course: {} (ID: {})", course.name, course.id)?;
        writeln!(self.out, "Credits: {}", course.credits)?;
        writeln!(self.out, "Schedule: {}", format_schedule(course.schedule()))?;
        writeln!(
            self.out,
            "Prerequisites: {}",
            none_if_empty(&course.prerequisites.join(", "))
        )?;
        writeln!(self.out, "Enrolled Students: {}", course.students().len())?;
        writeln!(self.out, "Faculty: {faculty}")?;
        if let Some(fee) = self.registry.ledger().tuition_fee(id) {
            writeln!(self.out, "Tuition: {fee}")?;
        }
        Ok(())
    }

    fn faculty_courses(&mut self, id: &str) -> Result<(), ShellError> {
        let faculty = self.registry.faculty(id)?;
        writeln!(self.out, "Courses assigned to {}:", faculty.name)?;
        for course in faculty
            .courses()
            .iter()
            .filter_map(|c| self.registry.course(c).ok())
        {
            writeln!(self.out, "- {} (ID: {})", course.name, course.id)?;
        }
        Ok(())
    }

    fn performance(&mut self, student_id: &str) -> Result<(), ShellError> {
        let student = self.registry.student(student_id)?;
        writeln!(self.out, "Academic Performance for {}:", student.name)?;
        writeln!(self.out, "GPA: {:.2}", student.gpa())?;
        for standing in course_standings(&self.registry, student) {
            writeln!(
                self.out,
                "Course: {}, Grade: {}, Attendance: {:.2}%",
                standing.course_name,
                standing.grade_label(),
                standing.attendance
            )?;
        }
        Ok(())
    }

    fn global_schedule(&mut self) -> Result<(), ShellError> {
        let grid = build_global_schedule(&self.registry);
        for conflict in &grid.conflicts {
            writeln!(
                self.out,
                "⚠ Scheduling conflict: {} on {} at {} (slot held by {})",
                conflict.course_name, conflict.day, conflict.time, conflict.occupied_by
            )?;
        }

        writeln!(self.out, "Generated Class Schedule:")?;
        for (day, slots) in &grid.days {
            writeln!(self.out, "{day}:")?;
            for (time, course) in slots {
                writeln!(self.out, "  {time}: {course}")?;
            }
        }
        Ok(())
    }

    fn update_schedule(&mut self, course_id: &str, schedule: WeeklySchedule) -> Result<(), ShellError> {
        let mut sink = WriterNotifier {
            out: &mut self.out,
            failed: None,
        };
        let update = update_schedule(&mut self.registry, course_id, schedule, &mut sink)?;
        if let Some(e) = sink.failed {
            return Err(e.into());
        }

        writeln!(
            self.out,
            "✓ Schedule updated for course {} ({} student(s) notified).",
            self.registry.course(course_id)?.name,
            update.notified
        )?;
        Ok(())
    }

    fn timetable(&mut self) -> Result<(), ShellError> {
        for course in self.registry.courses() {
            writeln!(self.out, "{} (ID: {}):", course.name, course.id)?;
            for day in Weekday::ALL {
                if let Some(time) = course.slot(day) {
                    writeln!(self.out, "  {day}: {time}")?;
                }
            }
        }
        Ok(())
    }

    fn report(&mut self, kind: ReportKind) -> Result<(), ShellError> {
        let text = kind.render(&self.registry)?;
        write!(self.out, "{text}")?;
        if !text.ends_with('\n') {
            writeln!(self.out)?;
        }
        Ok(())
    }
}

const fn presence_label(present: bool) -> &'static str {
    if present {
        "present"
    } else {
        "absent"
    }
}

fn none_if_empty(s: &str) -> &str {
    if s.is_empty() {
        "None"
    } else {
        s
    }
}

fn format_schedule(schedule: &WeeklySchedule) -> String {
    if schedule.is_empty() {
        return "None".to_string();
    }
    schedule
        .iter()
        .map(|(day, time)| format!("{day} {time}"))
        .collect::<Vec<_>>()
        .join(", ")
}
