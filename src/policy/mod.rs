//! Slot policy
//!
//! Pure functions deciding which slot boots and how the record changes
//! on activation, failover, success and reset.
//!
//! # Rules
//!
//! - The active slot is derived from priorities alone; there is no flag.
//! - Ties resolve to slot B.
//! - Activation demotes a competing top-priority slot to keep priorities distinct.
//! - `tries_remaining` is refilled here but never counted down.

mod outcome;
mod slots;

pub use outcome::{apply_boot_outcome, BootOutcome};
pub use slots::{active_slot, failover, reset, set_active_slot, set_successful_boot};
