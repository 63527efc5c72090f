//! On-disk layout of the boot metadata record
//!
//! ```text
//! offset  size  field
//! ------  ----  -----------------------------------------------
//!      0     4  magic ("\0AB0")
//!      4     1  version major
//!      5     1  version minor
//!      6     2  reserved
//!      8     4  slot A (priority, tries_remaining, successful_boot, reserved)
//!     12     4  slot B (same sub-layout)
//!     16    12  reserved
//!     28     4  crc32 (u32 BE)
//! ```
//!
//! All multi-byte integers are big-endian.

/// Magic bytes identifying a boot metadata record
pub const MAGIC: [u8; MAGIC_LEN] = *b"\0AB0";

/// Length of the magic field
pub const MAGIC_LEN: usize = 4;

/// Highest major version this crate understands
pub const MAJOR_VERSION: u8 = 1;

/// Minor version written on reset
pub const MINOR_VERSION: u8 = 0;

/// Total size of the encoded record
pub const RECORD_SIZE: usize = 32;

/// Size of one encoded slot entry
pub const SLOT_SIZE: usize = 4;

/// Number of slots in the record
pub const SLOT_COUNT: usize = 2;

pub const VERSION_MAJOR_OFFSET: usize = 4;
pub const VERSION_MINOR_OFFSET: usize = 5;
pub const RESERVED1_OFFSET: usize = 6;
pub const RESERVED1_LEN: usize = 2;
pub const SLOTS_OFFSET: usize = 8;
pub const RESERVED2_OFFSET: usize = 16;
pub const RESERVED2_LEN: usize = 12;
pub const CRC_OFFSET: usize = 28;

/// Highest slot priority; the active slot is promoted to this value
pub const MAX_PRIORITY: u8 = 15;

/// Highest tries-remaining value
pub const MAX_TRIES_REMAINING: u8 = 7;

/// Misc device holding the record
pub const DEFAULT_DEVICE_PATH: &str = "/dev/misc";

/// Offset of the record inside the misc buffer
pub const DEFAULT_METADATA_OFFSET: u64 = 2048;

/// Size of the misc buffer read and rewritten on every persist
pub const DEFAULT_BUFFER_SIZE: usize = 2080;
