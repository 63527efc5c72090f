//! Slot selection and mutation rules
//!
//! Each function takes the current record and returns the new one. None
//! of them touch the crc field; the caller stamps it before persisting.

use crate::metadata::layout::{MAX_PRIORITY, MAX_TRIES_REMAINING};
use crate::metadata::{BootMetadata, Slot};

/// The slot that boots next.
///
/// Slot A wins only with strictly higher priority; ties go to slot B.
pub fn active_slot(metadata: &BootMetadata) -> Slot {
    if metadata.slot(Slot::A).priority > metadata.slot(Slot::B).priority {
        Slot::A
    } else {
        Slot::B
    }
}

/// Promote `slot` to top priority with full tries and a cleared success flag.
///
/// If the other slot also sits at top priority it is demoted by one so
/// the two can never tie. Otherwise the other slot is left untouched.
pub fn set_active_slot(metadata: &BootMetadata, slot: Slot) -> BootMetadata {
    let mut next = *metadata;

    let target = next.slot_mut(slot);
    target.priority = MAX_PRIORITY;
    target.tries_remaining = MAX_TRIES_REMAINING;
    target.successful_boot = 0;

    let other = next.slot_mut(slot.other());
    if other.priority == MAX_PRIORITY {
        other.priority = MAX_PRIORITY - 1;
    }

    next
}

/// Promote whichever slot is currently inactive.
///
/// Tries remaining on the target slot are not consulted.
pub fn failover(metadata: &BootMetadata) -> BootMetadata {
    let target = active_slot(metadata).other();
    set_active_slot(metadata, target)
}

/// Mark `slot` as successfully booted and refill its tries.
pub fn set_successful_boot(metadata: &BootMetadata, slot: Slot) -> BootMetadata {
    let mut next = *metadata;
    let target = next.slot_mut(slot);
    target.tries_remaining = MAX_TRIES_REMAINING;
    target.successful_boot = 1;
    next
}

/// Restore the default record: slot A at 15, slot B at 14, reserved zeroed.
///
/// The incoming record is discarded entirely.
pub fn reset(_metadata: &BootMetadata) -> BootMetadata {
    BootMetadata::default()
}
