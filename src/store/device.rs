//! Device-backed partition store
//!
//! Every call opens the device, reads the first `buffer_size` bytes and
//! closes it again. Writes splice the window into that buffer and write
//! the whole buffer back at offset 0, followed by fsync.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::PathBuf;

use super::{window_range, PartitionStore};
use crate::metadata::{BootError, BootResult};

/// Partition store over a block device or regular file
#[derive(Debug, Clone)]
pub struct DeviceStore {
    /// Path to the misc device
    path: PathBuf,
    /// Bytes read and rewritten on every access
    buffer_size: usize,
}

impl DeviceStore {
    /// Create a store for `path` covering its first `buffer_size` bytes.
    ///
    /// The device is not touched until the first read or write.
    pub fn new(path: impl Into<PathBuf>, buffer_size: usize) -> Self {
        Self {
            path: path.into(),
            buffer_size,
        }
    }

    fn open(&self, write: bool) -> BootResult<File> {
        OpenOptions::new()
            .read(true)
            .write(write)
            .open(&self.path)
            .map_err(|e| BootError::device_open_failed(self.path.display().to_string(), e))
    }

    fn read_buffer(&self, file: &mut File) -> BootResult<Vec<u8>> {
        let mut buffer = vec![0u8; self.buffer_size];
        file.seek(SeekFrom::Start(0))
            .and_then(|_| file.read_exact(&mut buffer))
            .map_err(|e| {
                BootError::device_read_failed(
                    format!("failed to read {} bytes from device", self.buffer_size),
                    e,
                )
            })?;
        Ok(buffer)
    }
}

impl PartitionStore for DeviceStore {
    fn read_window(&mut self, offset: u64, len: usize) -> BootResult<Vec<u8>> {
        let range = window_range(offset, len, self.buffer_size)
            .ok_or_else(|| BootError::device_read_out_of_range(offset, len, self.buffer_size))?;

        let mut file = self.open(false)?;
        let buffer = self.read_buffer(&mut file)?;
        Ok(buffer[range].to_vec())
    }

    fn write_window(&mut self, offset: u64, data: &[u8]) -> BootResult<()> {
        let range = window_range(offset, data.len(), self.buffer_size).ok_or_else(|| {
            BootError::device_write_out_of_range(offset, data.len(), self.buffer_size)
        })?;

        let mut file = self.open(true)?;
        let mut buffer = self.read_buffer(&mut file)?;
        buffer[range].copy_from_slice(data);

        file.seek(SeekFrom::Start(0))
            .and_then(|_| file.write_all(&buffer))
            .map_err(|e| BootError::device_write_failed("failed to write device buffer", e))?;

        file.sync_all()
            .map_err(|e| BootError::device_write_failed("failed to sync device", e))?;

        Ok(())
    }
}
