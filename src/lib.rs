//! slotctl - A/B boot slot metadata controller
//!
//! Reads and rewrites the 32-byte boot metadata record that a bootloader
//! consults to pick between two firmware slots.
//!
//! - `metadata`: record layout, codec, validation, checksum
//! - `policy`: slot selection and mutation rules
//! - `store`: device access with read-modify-write of the misc buffer
//! - `control`: load, mutate, persist

pub mod cli;
pub mod control;
pub mod metadata;
pub mod observability;
pub mod policy;
pub mod store;
