//! Academic records and scheduling engine
//!
//! The [`registry::Registry`] owns every entity. The other modules are
//! components operating on a registry passed in explicitly:
//! - [`enrollment`] keeps the student/course relation symmetric
//! - [`records`] tracks grades, attendance and GPA
//! - [`scheduling`] builds the timetable and applies schedule updates
//! - [`analytics`] computes registry-wide rates

pub mod analytics;
pub mod enrollment;
pub mod error;
pub mod ledger;
pub mod models;
pub mod notify;
pub mod records;
pub mod registry;
pub mod report;
pub mod scheduling;

pub use error::{EntityKind, RecordsError, Result};
pub use registry::Registry;

/// Returns the current version of the `uni-records` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
