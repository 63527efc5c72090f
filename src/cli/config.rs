//! Configuration file
//!
//! Optional JSON file; every field has a default:
//!
//! ```json
//! { "device_path": "/dev/misc", "metadata_offset": 2048, "buffer_size": 2080 }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::metadata::layout::{
    DEFAULT_BUFFER_SIZE, DEFAULT_DEVICE_PATH, DEFAULT_METADATA_OFFSET, RECORD_SIZE,
};
use crate::store::DeviceStore;

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Misc device holding the metadata (default "/dev/misc")
    #[serde(default = "default_device_path")]
    pub device_path: PathBuf,

    /// Offset of the metadata record inside the buffer (default 2048)
    #[serde(default = "default_metadata_offset")]
    pub metadata_offset: u64,

    /// Bytes read and rewritten on every persist (default 2080)
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
}

fn default_device_path() -> PathBuf {
    PathBuf::from(DEFAULT_DEVICE_PATH)
}
fn default_metadata_offset() -> u64 {
    DEFAULT_METADATA_OFFSET
}
fn default_buffer_size() -> usize {
    DEFAULT_BUFFER_SIZE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device_path: default_device_path(),
            metadata_offset: default_metadata_offset(),
            buffer_size: default_buffer_size(),
        }
    }
}

impl Config {
    /// Load and validate configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let config = Self::read(path)?;
        config.validate()?;
        Ok(config)
    }

    fn read(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))
    }

    /// Resolve the effective configuration from CLI options.
    ///
    /// Without a file the defaults apply; `device` overrides `device_path`.
    pub fn resolve(path: Option<&Path>, device: Option<&Path>) -> CliResult<Self> {
        let mut config = match path {
            Some(path) => Self::read(path)?,
            None => Self::default(),
        };

        if let Some(device) = device {
            config.device_path = device.to_path_buf();
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.device_path.as_os_str().is_empty() {
            return Err(CliError::config_error("device_path must not be empty"));
        }

        if self.buffer_size == 0 {
            return Err(CliError::config_error("buffer_size must be > 0"));
        }

        let fits = usize::try_from(self.metadata_offset)
            .ok()
            .and_then(|offset| offset.checked_add(RECORD_SIZE))
            .map(|end| end <= self.buffer_size)
            .unwrap_or(false);
        if !fits {
            return Err(CliError::config_error(format!(
                "metadata_offset {} + record size {} exceeds buffer_size {}",
                self.metadata_offset, RECORD_SIZE, self.buffer_size
            )));
        }

        Ok(())
    }

    /// Build the device store described by this configuration
    pub fn device_store(&self) -> DeviceStore {
        DeviceStore::new(&self.device_path, self.buffer_size)
    }
}
