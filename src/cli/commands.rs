//! CLI command implementations
//!
//! Each command resolves the configuration, opens the device store and
//! runs exactly one `BootControl` operation. Argument values are parsed
//! before the device is touched, so a bad value never reaches the store.

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::CliResult;
use super::io::write_status;
use crate::control::BootControl;
use crate::metadata::{BootMetadata, Slot};
use crate::policy::BootOutcome;
use crate::store::{DeviceStore, PartitionStore};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let config = Config::resolve(cli.config.as_deref(), cli.device.as_deref())?;

    run_command(cli.command, &config)
}

/// Run the appropriate command against the configured device
pub fn run_command(cmd: Command, config: &Config) -> CliResult<()> {
    let mut control = open(config);

    match cmd {
        Command::Status { json } => status(&mut control, json),
        Command::BootResult { result } => boot_result(&mut control, &result).map(drop),
        Command::SetActive { slot } => set_active(&mut control, &slot).map(drop),
        Command::Failover => failover(&mut control).map(drop),
        Command::Reset { force } => reset(&mut control, force).map(drop),
    }
}

/// Build the controller for the configured device and offset
pub fn open(config: &Config) -> BootControl<DeviceStore> {
    BootControl::with_offset(config.device_store(), config.metadata_offset)
}

/// Print the current record
pub fn status<S: PartitionStore>(control: &mut BootControl<S>, json: bool) -> CliResult<()> {
    let metadata = control.status()?;
    write_status(&metadata, json)
}

/// Apply a boot result (`0` failure, `1` success) to the active slot
pub fn boot_result<S: PartitionStore>(
    control: &mut BootControl<S>,
    value: &str,
) -> CliResult<BootMetadata> {
    let outcome = BootOutcome::parse(value)?;
    Ok(control.set_boot_result(outcome)?)
}

/// Make the given slot active
pub fn set_active<S: PartitionStore>(
    control: &mut BootControl<S>,
    value: &str,
) -> CliResult<BootMetadata> {
    let slot = Slot::parse(value)?;
    Ok(control.set_active_slot(slot)?)
}

/// Switch to the inactive slot
pub fn failover<S: PartitionStore>(control: &mut BootControl<S>) -> CliResult<BootMetadata> {
    Ok(control.failover()?)
}

/// Restore defaults; `force` skips loading the current record
pub fn reset<S: PartitionStore>(
    control: &mut BootControl<S>,
    force: bool,
) -> CliResult<BootMetadata> {
    if force {
        Ok(control.initialize()?)
    } else {
        Ok(control.reset()?)
    }
}
