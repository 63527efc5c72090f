//! In-memory partition store
//!
//! Holds the whole buffer in a `Vec<u8>`. Reads and writes can be made
//! to fail on demand so callers can check that nothing is persisted
//! after an error.

use std::io;

use super::{window_range, PartitionStore};
use crate::metadata::{BootError, BootResult};

/// Partition store backed by a byte vector
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    buffer: Vec<u8>,
    fail_reads: bool,
    fail_writes: bool,
    writes: usize,
}

impl MemoryStore {
    /// Create a store over an existing buffer
    pub fn new(buffer: Vec<u8>) -> Self {
        Self {
            buffer,
            ..Default::default()
        }
    }

    /// Create a zero-filled store of `size` bytes
    pub fn zeroed(size: usize) -> Self {
        Self::new(vec![0u8; size])
    }

    /// Make every subsequent read fail
    pub fn fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    /// Make every subsequent write fail
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// The whole buffer
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Consume the store and return its buffer
    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }
}

impl PartitionStore for MemoryStore {
    fn read_window(&mut self, offset: u64, len: usize) -> BootResult<Vec<u8>> {
        if self.fail_reads {
            return Err(BootError::device_read_failed(
                "injected read failure",
                io::Error::new(io::ErrorKind::Other, "read disabled"),
            ));
        }
        let range = window_range(offset, len, self.buffer.len())
            .ok_or_else(|| BootError::device_read_out_of_range(offset, len, self.buffer.len()))?;
        Ok(self.buffer[range].to_vec())
    }

    fn write_window(&mut self, offset: u64, data: &[u8]) -> BootResult<()> {
        if self.fail_writes {
            return Err(BootError::device_write_failed(
                "injected write failure",
                io::Error::new(io::ErrorKind::Other, "write disabled"),
            ));
        }
        let range = window_range(offset, data.len(), self.buffer.len()).ok_or_else(|| {
            BootError::device_write_out_of_range(offset, data.len(), self.buffer.len())
        })?;

        self.buffer[range].copy_from_slice(data);
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::BootErrorCode;

    #[test]
    fn test_write_then_read_window() {
        let mut store = MemoryStore::zeroed(64);
        store.write_window(16, &[1, 2, 3, 4]).unwrap();
        assert_eq!(store.read_window(16, 4).unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn test_write_preserves_surrounding_bytes() {
        let mut store = MemoryStore::new(vec![0xA5; 64]);
        store.write_window(8, &[0; 4]).unwrap();
        let bytes = store.as_bytes();
        assert!(bytes[..8].iter().all(|b| *b == 0xA5));
        assert!(bytes[12..].iter().all(|b| *b == 0xA5));
    }

    #[test]
    fn test_out_of_range_window_rejected() {
        let mut store = MemoryStore::zeroed(16);
        let err = store.read_window(8, 16).unwrap_err();
        assert_eq!(err.code(), BootErrorCode::DeviceReadFailed);
        let err = store.write_window(15, &[0, 0]).unwrap_err();
        assert_eq!(err.code(), BootErrorCode::DeviceWriteFailed);
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn test_injected_failures() {
        let mut store = MemoryStore::zeroed(16);
        store.fail_reads(true);
        assert_eq!(
            store.read_window(0, 4).unwrap_err().code(),
            BootErrorCode::DeviceReadFailed
        );
        store.fail_writes(true);
        assert_eq!(
            store.write_window(0, &[1]).unwrap_err().code(),
            BootErrorCode::DeviceWriteFailed
        );
        assert_eq!(store.into_inner(), vec![0u8; 16]);
    }
}
