//! CRC32 checksum for the boot metadata record
//!
//! The checksum is CRC32 (IEEE polynomial) over a window of
//! `RECORD_SIZE - 4` bytes with the crc field treated as zero. The
//! window holds the magic followed by zero fill; slot fields are not
//! part of it. Existing bootloaders compute the same window, so it must
//! not change without a format bump.
//!
//! The checksum is stamped on every persist and never verified on load.

use crc32fast::Hasher;

use super::layout::{MAGIC_LEN, RECORD_SIZE};
use super::record::BootMetadata;

/// Length of the checksummed window
pub const CHECKSUM_WINDOW_LEN: usize = RECORD_SIZE - 4;

/// Build the exact byte window the checksum covers.
pub fn checksum_window(metadata: &BootMetadata) -> [u8; CHECKSUM_WINDOW_LEN] {
    let mut window = [0u8; CHECKSUM_WINDOW_LEN];
    window[..MAGIC_LEN].copy_from_slice(&metadata.magic);
    window
}

/// Computes the CRC32 checksum of a metadata record.
///
/// Deterministic: the same record always yields the same value.
pub fn compute_checksum(metadata: &BootMetadata) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(&checksum_window(metadata));
    hasher.finalize()
}

/// Returns a copy of `metadata` with its crc field recomputed.
pub fn stamp(metadata: &BootMetadata) -> BootMetadata {
    BootMetadata {
        crc32: compute_checksum(metadata),
        ..*metadata
    }
}

/// Reports whether the stored crc matches the computed one.
///
/// Informational only; loading never rejects a record on this basis.
pub fn verify_checksum(metadata: &BootMetadata) -> bool {
    compute_checksum(metadata) == metadata.crc32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::record::Slot;

    #[test]
    fn test_checksum_deterministic() {
        let meta = BootMetadata::default();
        assert_eq!(compute_checksum(&meta), compute_checksum(&meta));
    }

    #[test]
    fn test_checksum_matches_plain_crc32_of_window() {
        let meta = BootMetadata::default();
        let mut expected = [0u8; 28];
        expected[..4].copy_from_slice(b"\0AB0");
        assert_eq!(compute_checksum(&meta), crc32fast::hash(&expected));
    }

    #[test]
    fn test_checksum_ignores_crc_field() {
        let mut meta = BootMetadata::default();
        let before = compute_checksum(&meta);
        meta.crc32 = 0x1234_5678;
        assert_eq!(compute_checksum(&meta), before);
    }

    #[test]
    fn test_checksum_does_not_cover_slot_fields() {
        let meta = BootMetadata::default();
        let mut changed = meta;
        changed.slot_mut(Slot::B).priority = 3;
        changed.slot_mut(Slot::A).successful_boot = 1;
        assert_eq!(compute_checksum(&meta), compute_checksum(&changed));
    }

    #[test]
    fn test_checksum_covers_magic() {
        let meta = BootMetadata::default();
        let mut changed = meta;
        changed.magic[3] ^= 0x01;
        assert_ne!(compute_checksum(&meta), compute_checksum(&changed));
    }

    #[test]
    fn test_stamp_then_verify() {
        let meta = BootMetadata::default();
        let stamped = stamp(&meta);
        assert!(verify_checksum(&stamped));
        assert_eq!(stamped.slots, meta.slots);
    }
}
