//! CLI argument definitions using clap
//!
//! Commands:
//! - slotctl status [--json]
//! - slotctl boot-result <0|1>
//! - slotctl set-active <0|1|a|b>
//! - slotctl failover
//! - slotctl reset [--force]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// slotctl - A/B boot slot metadata controller
#[derive(Parser, Debug)]
#[command(name = "slotctl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to an optional JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Misc device path (overrides the configuration file)
    #[arg(long, global = true)]
    pub device: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the boot metadata and the active slot
    Status {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Record the result of the last boot: 0 for failure, 1 for success
    BootResult {
        /// Boot result value
        result: String,
    },

    /// Set the active boot slot: 0 (A) or 1 (B)
    SetActive {
        /// Slot number or letter
        slot: String,
    },

    /// Switch to the currently inactive slot
    Failover,

    /// Reset all boot data and switch back to slot A
    Reset {
        /// Write defaults even if the current record does not validate
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
