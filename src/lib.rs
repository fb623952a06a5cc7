//! `uni-records`: an in-memory academic records and scheduling engine
//!
//! Contains the core engine, configuration and the command shell used by the
//! `unirecords` binary.

pub mod config;
pub mod core;
pub mod shell;

pub use crate::core::get_version;
pub use logger::{debug, error, info, verbose, warn};
