//! Boot metadata record for the A/B slot scheme
//!
//! A fixed 32-byte big-endian record stored at a known offset in the misc
//! partition. It tells the bootloader which of two firmware slots to boot
//! and records whether a slot has booted successfully.
//!
//! # Pipeline
//!
//! Every invocation rebuilds the record from the device:
//!
//! ```text
//! bytes -> decode -> validate -> policy -> stamp checksum -> encode -> bytes
//! ```
//!
//! No in-memory copy outlives a single operation.

mod checksum;
mod errors;
pub mod layout;
mod record;
mod validator;

pub use checksum::{checksum_window, compute_checksum, stamp, verify_checksum, CHECKSUM_WINDOW_LEN};
pub use errors::{BootError, BootErrorCode, BootResult, ValidationError};
pub use record::{BootMetadata, Slot, SlotRecord};
pub use validator::validate;
