//! Record Format Tests
//!
//! Tests for:
//! - Big-endian field layout at fixed offsets
//! - Decode/encode reproduces canonical input
//! - Validation of magic and major version
//! - Checksum window and determinism

use slotctl::metadata::layout::{MAGIC, RECORD_SIZE};
use slotctl::metadata::{
    compute_checksum, stamp, validate, verify_checksum, BootErrorCode, BootMetadata, Slot,
    ValidationError,
};

// =============================================================================
// Test Utilities
// =============================================================================

/// A canonical record with every field distinct, reserved bytes included.
fn canonical_bytes() -> Vec<u8> {
    let mut raw = vec![0u8; RECORD_SIZE];
    raw[0..4].copy_from_slice(&MAGIC);
    raw[4] = 1;
    raw[5] = 2;
    raw[6..8].copy_from_slice(&[0x10, 0x11]);
    raw[8..12].copy_from_slice(&[12, 5, 1, 0x21]);
    raw[12..16].copy_from_slice(&[13, 6, 0, 0x22]);
    for (i, b) in raw[16..28].iter_mut().enumerate() {
        *b = 0x30 + i as u8;
    }
    raw[28..32].copy_from_slice(&[0x89, 0xAB, 0xCD, 0xEF]);
    raw
}

// =============================================================================
// Codec
// =============================================================================

#[test]
fn test_decode_encode_reproduces_bytes() {
    let raw = canonical_bytes();
    let meta = BootMetadata::decode(&raw).unwrap();
    assert_eq!(meta.encode().to_vec(), raw);
}

#[test]
fn test_crc_field_is_big_endian() {
    let meta = BootMetadata::decode(&canonical_bytes()).unwrap();
    assert_eq!(meta.crc32, 0x89AB_CDEF);
}

#[test]
fn test_slot_fields_at_fixed_offsets() {
    let meta = BootMetadata::decode(&canonical_bytes()).unwrap();
    let a = meta.slot(Slot::A);
    let b = meta.slot(Slot::B);
    assert_eq!((a.priority, a.tries_remaining, a.successful_boot), (12, 5, 1));
    assert_eq!((b.priority, b.tries_remaining, b.successful_boot), (13, 6, 0));
}

#[test]
fn test_encode_is_deterministic_and_fixed_size() {
    let meta = BootMetadata::default();
    let first = meta.encode();
    let second = meta.encode();
    assert_eq!(first.len(), RECORD_SIZE);
    assert_eq!(first, second);
}

#[test]
fn test_every_short_length_fails_to_parse() {
    let raw = canonical_bytes();
    for len in 0..RECORD_SIZE {
        let err = BootMetadata::decode(&raw[..len]).unwrap_err();
        assert_eq!(err.code(), BootErrorCode::ParseFailed, "len {}", len);
    }
}

// =============================================================================
// Validation
// =============================================================================

/// Any change to any magic byte is rejected.
#[test]
fn test_any_magic_byte_change_rejected() {
    for i in 0..4 {
        let mut raw = canonical_bytes();
        raw[i] ^= 0x01;
        let meta = BootMetadata::decode(&raw).unwrap();
        assert!(matches!(
            validate(&meta),
            Err(ValidationError::BadMagic { .. })
        ));
    }
}

#[test]
fn test_major_version_bounds() {
    let mut raw = canonical_bytes();
    for major in 0..=1u8 {
        raw[4] = major;
        assert!(validate(&BootMetadata::decode(&raw).unwrap()).is_ok());
    }
    for major in [2u8, 3, 255] {
        raw[4] = major;
        assert_eq!(
            validate(&BootMetadata::decode(&raw).unwrap()),
            Err(ValidationError::UnsupportedVersion {
                major,
                supported: 1
            })
        );
    }
}

#[test]
fn test_minor_version_not_checked() {
    let mut raw = canonical_bytes();
    raw[5] = 0xFE;
    assert!(validate(&BootMetadata::decode(&raw).unwrap()).is_ok());
}

// =============================================================================
// Checksum
// =============================================================================

#[test]
fn test_checksum_is_pure() {
    let meta = BootMetadata::decode(&canonical_bytes()).unwrap();
    assert_eq!(compute_checksum(&meta), compute_checksum(&meta));
}

/// The window is the magic followed by 24 zero bytes.
#[test]
fn test_checksum_window_is_magic_plus_zero_fill() {
    let meta = BootMetadata::decode(&canonical_bytes()).unwrap();
    let mut window = vec![0u8; RECORD_SIZE - 4];
    window[..4].copy_from_slice(&MAGIC);
    assert_eq!(compute_checksum(&meta), crc32fast::hash(&window));
    assert_eq!(compute_checksum(&meta), compute_checksum(&BootMetadata::default()));
}

#[test]
fn test_stamped_record_verifies_after_round_trip() {
    let stamped = stamp(&BootMetadata::decode(&canonical_bytes()).unwrap());
    let reloaded = BootMetadata::decode(&stamped.encode()).unwrap();
    assert!(verify_checksum(&reloaded));
}
