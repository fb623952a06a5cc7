//! CLI command handlers for `unirecords`.
//!
//! Each subcommand is implemented in its own submodule.

pub mod config;
pub mod shell;
