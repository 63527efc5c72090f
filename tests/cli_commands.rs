//! CLI Command Tests
//!
//! Drives `run_command` against a file-backed misc image, the same path
//! the binary takes after argument parsing.

use std::fs;

use slotctl::cli::{run_command, Command, Config};
use slotctl::control::BootControl;
use slotctl::metadata::layout::{DEFAULT_METADATA_OFFSET, RECORD_SIZE};
use slotctl::metadata::{BootMetadata, Slot};
use slotctl::policy::active_slot;
use slotctl::store::DeviceStore;
use tempfile::TempDir;

// =============================================================================
// Test Utilities
// =============================================================================

const BUFFER_SIZE: usize = 4096;
const OFFSET: u64 = 1024;

fn setup(dir: &TempDir, seed_record: bool) -> Config {
    let device = dir.path().join("misc.img");
    let mut contents = vec![0x6Cu8; BUFFER_SIZE];
    if seed_record {
        let start = OFFSET as usize;
        contents[start..start + RECORD_SIZE].copy_from_slice(&BootMetadata::default().encode());
    }
    fs::write(&device, contents).unwrap();

    let config_path = dir.path().join("slotctl.json");
    fs::write(
        &config_path,
        format!(
            r#"{{"device_path": {:?}, "metadata_offset": {}, "buffer_size": {}}}"#,
            device.display().to_string(),
            OFFSET,
            BUFFER_SIZE
        ),
    )
    .unwrap();

    Config::resolve(Some(config_path.as_path()), None).unwrap()
}

fn load(config: &Config) -> BootMetadata {
    BootControl::with_offset(
        DeviceStore::new(&config.device_path, config.buffer_size),
        config.metadata_offset,
    )
    .status()
    .unwrap()
}

// =============================================================================
// Commands
// =============================================================================

#[test]
fn test_config_file_points_at_device() {
    let dir = TempDir::new().unwrap();
    let config = setup(&dir, true);
    assert_eq!(config.metadata_offset, OFFSET);
    assert_eq!(config.buffer_size, BUFFER_SIZE);
    assert!(config.device_path.starts_with(dir.path()));
    assert_ne!(config.metadata_offset, DEFAULT_METADATA_OFFSET);
}

#[test]
fn test_status_command_succeeds() {
    let dir = TempDir::new().unwrap();
    let config = setup(&dir, true);
    run_command(Command::Status { json: true }, &config).unwrap();
    run_command(Command::Status { json: false }, &config).unwrap();
}

#[test]
fn test_set_active_then_boot_result() {
    let dir = TempDir::new().unwrap();
    let config = setup(&dir, true);

    run_command(Command::SetActive { slot: "1".into() }, &config).unwrap();
    run_command(Command::BootResult { result: "1".into() }, &config).unwrap();

    let meta = load(&config);
    assert_eq!(active_slot(&meta), Slot::B);
    assert!(meta.slot(Slot::B).is_successful());
}

#[test]
fn test_failover_command() {
    let dir = TempDir::new().unwrap();
    let config = setup(&dir, true);

    run_command(Command::Failover, &config).unwrap();
    assert_eq!(active_slot(&load(&config)), Slot::B);
}

#[test]
fn test_invalid_slot_leaves_device_untouched() {
    let dir = TempDir::new().unwrap();
    let config = setup(&dir, true);
    let before = fs::read(&config.device_path).unwrap();

    let err = run_command(Command::SetActive { slot: "7".into() }, &config).unwrap_err();
    assert_eq!(err.code_str(), "SLOT_INVALID_ARGUMENT");
    assert_eq!(fs::read(&config.device_path).unwrap(), before);
}

#[test]
fn test_reset_on_blank_device_needs_force() {
    let dir = TempDir::new().unwrap();
    let config = setup(&dir, false);

    let err = run_command(Command::Reset { force: false }, &config).unwrap_err();
    assert_eq!(err.code_str(), "SLOT_VALIDATION_FAILED");

    run_command(Command::Reset { force: true }, &config).unwrap();
    assert_eq!(active_slot(&load(&config)), Slot::A);

    let after = fs::read(&config.device_path).unwrap();
    let start = OFFSET as usize;
    assert!(after[..start].iter().all(|b| *b == 0x6C));
    assert!(after[start + RECORD_SIZE..].iter().all(|b| *b == 0x6C));
}

#[test]
fn test_missing_device_error_code() {
    let dir = TempDir::new().unwrap();
    let config = Config::resolve(None, Some(dir.path().join("absent").as_path())).unwrap();

    let err = run_command(Command::Status { json: false }, &config).unwrap_err();
    assert_eq!(err.code_str(), "SLOT_DEVICE_OPEN_FAILED");
}
