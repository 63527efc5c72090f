//! Boot metadata record types and the big-endian codec
//!
//! The record is packed and unpacked field by field, never by
//! reinterpreting an in-memory struct, so the on-disk format does not
//! depend on compiler padding or host endianness.

use std::fmt;

use super::errors::{BootError, BootResult};
use super::layout::{
    CRC_OFFSET, MAGIC, MAGIC_LEN, MAJOR_VERSION, MAX_PRIORITY, MAX_TRIES_REMAINING,
    MINOR_VERSION, RECORD_SIZE, RESERVED1_LEN, RESERVED1_OFFSET, RESERVED2_LEN,
    RESERVED2_OFFSET, SLOTS_OFFSET, SLOT_COUNT, SLOT_SIZE, VERSION_MAJOR_OFFSET,
    VERSION_MINOR_OFFSET,
};

/// One of the two firmware slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Slot 0
    A,
    /// Slot 1
    B,
}

impl Slot {
    /// Both slots in index order
    pub const ALL: [Slot; SLOT_COUNT] = [Slot::A, Slot::B];

    /// Index of this slot in the record (0 or 1)
    pub fn index(self) -> usize {
        match self {
            Slot::A => 0,
            Slot::B => 1,
        }
    }

    /// The opposite slot
    pub fn other(self) -> Self {
        match self {
            Slot::A => Slot::B,
            Slot::B => Slot::A,
        }
    }

    /// Upper-case slot letter
    pub fn letter(self) -> char {
        match self {
            Slot::A => 'A',
            Slot::B => 'B',
        }
    }

    /// Convert a numeric index, rejecting anything outside {0, 1}
    pub fn from_index(index: u8) -> BootResult<Self> {
        match index {
            0 => Ok(Slot::A),
            1 => Ok(Slot::B),
            other => Err(BootError::invalid_argument(format!(
                "invalid slot {}: must be 0 or 1",
                other
            ))),
        }
    }

    /// Parse a slot given as `0`/`1` or `a`/`b` (any case)
    pub fn parse(input: &str) -> BootResult<Self> {
        match input.trim() {
            "a" | "A" => Ok(Slot::A),
            "b" | "B" => Ok(Slot::B),
            other => other
                .parse::<u8>()
                .map_err(|_| {
                    BootError::invalid_argument(format!("invalid slot '{}': must be 0 or 1", other))
                })
                .and_then(Slot::from_index),
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Per-slot boot state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlotRecord {
    /// Selection priority (0-15); higher wins
    pub priority: u8,
    /// Boot attempts left (0-7)
    pub tries_remaining: u8,
    /// Raw success flag; the policy writes 0 or 1, other values are
    /// carried through until the flag is next set or cleared
    pub successful_boot: u8,
    /// Reserved, carried through untouched
    pub reserved: u8,
}

impl SlotRecord {
    /// Slot state written for a freshly promoted slot
    pub fn promoted() -> Self {
        Self {
            priority: MAX_PRIORITY,
            tries_remaining: MAX_TRIES_REMAINING,
            successful_boot: 0,
            reserved: 0,
        }
    }

    /// Slot has completed a boot cycle
    pub fn is_successful(&self) -> bool {
        self.successful_boot != 0
    }

    fn decode(bytes: &[u8]) -> Self {
        Self {
            priority: bytes[0],
            tries_remaining: bytes[1],
            successful_boot: bytes[2],
            reserved: bytes[3],
        }
    }

    fn encode(&self, out: &mut [u8]) {
        out[0] = self.priority;
        out[1] = self.tries_remaining;
        out[2] = self.successful_boot;
        out[3] = self.reserved;
    }
}

/// The complete A/B boot metadata record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootMetadata {
    pub magic: [u8; MAGIC_LEN],
    pub version_major: u8,
    pub version_minor: u8,
    pub reserved1: [u8; RESERVED1_LEN],
    /// Slot A at index 0, slot B at index 1
    pub slots: [SlotRecord; SLOT_COUNT],
    pub reserved2: [u8; RESERVED2_LEN],
    pub crc32: u32,
}

impl Default for BootMetadata {
    /// The reset record: slot A active, both slots at full tries.
    fn default() -> Self {
        let mut slot_b = SlotRecord::promoted();
        slot_b.priority = MAX_PRIORITY - 1;

        Self {
            magic: MAGIC,
            version_major: MAJOR_VERSION,
            version_minor: MINOR_VERSION,
            reserved1: [0; RESERVED1_LEN],
            slots: [SlotRecord::promoted(), slot_b],
            reserved2: [0; RESERVED2_LEN],
            crc32: 0,
        }
    }
}

impl BootMetadata {
    /// Borrow the state of one slot
    pub fn slot(&self, slot: Slot) -> &SlotRecord {
        &self.slots[slot.index()]
    }

    /// Mutably borrow the state of one slot
    pub fn slot_mut(&mut self, slot: Slot) -> &mut SlotRecord {
        &mut self.slots[slot.index()]
    }

    /// Decode a record from the first `RECORD_SIZE` bytes of `data`.
    ///
    /// Bytes past the record are ignored. Nothing is validated here.
    pub fn decode(data: &[u8]) -> BootResult<Self> {
        if data.len() < RECORD_SIZE {
            return Err(BootError::parse_failed(data.len(), RECORD_SIZE));
        }

        let mut magic = [0u8; MAGIC_LEN];
        magic.copy_from_slice(&data[..MAGIC_LEN]);

        let mut reserved1 = [0u8; RESERVED1_LEN];
        reserved1.copy_from_slice(&data[RESERVED1_OFFSET..RESERVED1_OFFSET + RESERVED1_LEN]);

        let mut slots = [SlotRecord::default(); SLOT_COUNT];
        for (i, slot) in slots.iter_mut().enumerate() {
            let start = SLOTS_OFFSET + i * SLOT_SIZE;
            *slot = SlotRecord::decode(&data[start..start + SLOT_SIZE]);
        }

        let mut reserved2 = [0u8; RESERVED2_LEN];
        reserved2.copy_from_slice(&data[RESERVED2_OFFSET..RESERVED2_OFFSET + RESERVED2_LEN]);

        let crc32 = u32::from_be_bytes([
            data[CRC_OFFSET],
            data[CRC_OFFSET + 1],
            data[CRC_OFFSET + 2],
            data[CRC_OFFSET + 3],
        ]);

        Ok(Self {
            magic,
            version_major: data[VERSION_MAJOR_OFFSET],
            version_minor: data[VERSION_MINOR_OFFSET],
            reserved1,
            slots,
            reserved2,
            crc32,
        })
    }

    /// Encode the record to exactly `RECORD_SIZE` bytes.
    pub fn encode(&self) -> [u8; RECORD_SIZE] {
        let mut buf = [0u8; RECORD_SIZE];

        buf[..MAGIC_LEN].copy_from_slice(&self.magic);
        buf[VERSION_MAJOR_OFFSET] = self.version_major;
        buf[VERSION_MINOR_OFFSET] = self.version_minor;
        buf[RESERVED1_OFFSET..RESERVED1_OFFSET + RESERVED1_LEN].copy_from_slice(&self.reserved1);

        for (i, slot) in self.slots.iter().enumerate() {
            let start = SLOTS_OFFSET + i * SLOT_SIZE;
            slot.encode(&mut buf[start..start + SLOT_SIZE]);
        }

        buf[RESERVED2_OFFSET..RESERVED2_OFFSET + RESERVED2_LEN].copy_from_slice(&self.reserved2);
        buf[CRC_OFFSET..].copy_from_slice(&self.crc32.to_be_bytes());

        buf
    }
}
