//! CLI module for slotctl
//!
//! Provides command-line interface for:
//! - status: print the record and active slot
//! - boot-result: mark the active slot good, or fail over
//! - set-active: promote a slot explicitly
//! - failover: promote the inactive slot
//! - reset: restore defaults

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{boot_result, failover, open, reset, run, run_command, set_active, status};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{render_status_json, render_status_text, write_status, SlotReport, StatusReport};
