//! Partition store
//!
//! Byte-addressed access to a fixed-size buffer that holds the metadata
//! window somewhere inside it. Writes are read-modify-write over the
//! whole buffer: bytes outside the written window are preserved as read.
//!
//! The read-modify-write is not atomic against another writer. Callers
//! must ensure only one process touches the device at a time.

mod device;
mod memory;

pub use device::DeviceStore;
pub use memory::MemoryStore;

use std::ops::Range;

use crate::metadata::BootResult;

/// Backend trait for the partition holding the metadata window
pub trait PartitionStore: std::fmt::Debug {
    /// Read `len` bytes starting at `offset`
    fn read_window(&mut self, offset: u64, len: usize) -> BootResult<Vec<u8>>;

    /// Write `data` at `offset`, leaving every other byte of the buffer as it was
    fn write_window(&mut self, offset: u64, data: &[u8]) -> BootResult<()>;
}

/// Byte range of a window, or `None` if it does not fit in `size`.
fn window_range(offset: u64, len: usize, size: usize) -> Option<Range<usize>> {
    let start = usize::try_from(offset).ok()?;
    let end = start.checked_add(len)?;
    if end > size {
        return None;
    }
    Some(start..end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_range_inside_buffer() {
        assert_eq!(window_range(2048, 32, 2080), Some(2048..2080));
        assert_eq!(window_range(0, 0, 0), Some(0..0));
    }

    #[test]
    fn test_window_range_past_end() {
        assert_eq!(window_range(2049, 32, 2080), None);
        assert_eq!(window_range(u64::MAX, 32, 2080), None);
    }
}
