//! Boot control: one load, one policy step, one persist
//!
//! `BootControl` is the only place that touches the store. Each public
//! operation:
//!
//! 1. reads the metadata window
//! 2. decodes and validates it
//! 3. applies exactly one policy function
//! 4. stamps the checksum, encodes, writes the window back
//!
//! Any failure before step 4 returns early and nothing is written.

use crate::metadata::layout::{DEFAULT_METADATA_OFFSET, RECORD_SIZE};
use crate::metadata::{self, BootError, BootMetadata, BootResult, Slot};
use crate::observability::Logger;
use crate::policy::{self, BootOutcome};
use crate::store::PartitionStore;

/// Load/validate/mutate/persist driver over a partition store
#[derive(Debug)]
pub struct BootControl<S: PartitionStore> {
    store: S,
    offset: u64,
}

impl<S: PartitionStore> BootControl<S> {
    /// Controller for a record at the default misc offset
    pub fn new(store: S) -> Self {
        Self::with_offset(store, DEFAULT_METADATA_OFFSET)
    }

    /// Controller for a record at `offset` inside the store
    pub fn with_offset(store: S, offset: u64) -> Self {
        Self { store, offset }
    }

    /// Borrow the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the controller and return the store
    pub fn into_store(self) -> S {
        self.store
    }

    /// Read, decode and validate the record. The checksum is not checked.
    pub fn load(&mut self) -> BootResult<BootMetadata> {
        let bytes = self.store.read_window(self.offset, RECORD_SIZE)?;
        let record = BootMetadata::decode(&bytes)?;

        if let Err(reason) = metadata::validate(&record) {
            Logger::error(
                "METADATA_REJECTED",
                &[
                    ("offset", self.offset.to_string().as_str()),
                    ("reason", reason.to_string().as_str()),
                ],
            );
            return Err(BootError::from(reason));
        }

        if !metadata::verify_checksum(&record) {
            let expected = format!("{:#010x}", metadata::compute_checksum(&record));
            let stored = format!("{:#010x}", record.crc32);
            Logger::trace(
                "METADATA_CHECKSUM_MISMATCH",
                &[("expected", expected.as_str()), ("stored", stored.as_str())],
            );
        }

        Logger::trace(
            "METADATA_LOADED",
            &[("active_slot", policy::active_slot(&record).to_string().as_str())],
        );
        Ok(record)
    }

    /// Stamp the checksum and write the record back.
    ///
    /// Returns the record exactly as written.
    pub fn persist(&mut self, record: &BootMetadata) -> BootResult<BootMetadata> {
        let stamped = metadata::stamp(record);
        self.store.write_window(self.offset, &stamped.encode())?;

        Logger::trace(
            "METADATA_PERSISTED",
            &[("crc32", format!("{:#010x}", stamped.crc32).as_str())],
        );
        Ok(stamped)
    }

    /// Current record, without writing anything
    pub fn status(&mut self) -> BootResult<BootMetadata> {
        self.load()
    }

    /// Report the result of the last boot of the active slot
    pub fn set_boot_result(&mut self, outcome: BootOutcome) -> BootResult<BootMetadata> {
        let current = self.load()?;
        let slot = policy::active_slot(&current);
        let next = policy::apply_boot_outcome(&current, outcome);
        let written = self.persist(&next)?;

        match outcome {
            BootOutcome::Success => Logger::info(
                "BOOT_MARKED_SUCCESSFUL",
                &[("slot", slot.to_string().as_str())],
            ),
            BootOutcome::Failure => Logger::warn(
                "SLOT_FAILOVER",
                &[
                    ("from", slot.to_string().as_str()),
                    ("to", policy::active_slot(&written).to_string().as_str()),
                ],
            ),
        }
        Ok(written)
    }

    /// Make `slot` the slot that boots next
    pub fn set_active_slot(&mut self, slot: Slot) -> BootResult<BootMetadata> {
        let current = self.load()?;
        let written = self.persist(&policy::set_active_slot(&current, slot))?;

        Logger::info("SLOT_ACTIVATED", &[("slot", slot.to_string().as_str())]);
        Ok(written)
    }

    /// Switch to whichever slot is currently inactive
    pub fn failover(&mut self) -> BootResult<BootMetadata> {
        let current = self.load()?;
        let from = policy::active_slot(&current);
        let written = self.persist(&policy::failover(&current))?;

        Logger::warn(
            "SLOT_FAILOVER",
            &[
                ("from", from.to_string().as_str()),
                ("to", policy::active_slot(&written).to_string().as_str()),
            ],
        );
        Ok(written)
    }

    /// Restore defaults on a record that currently validates
    pub fn reset(&mut self) -> BootResult<BootMetadata> {
        let current = self.load()?;
        let written = self.persist(&policy::reset(&current))?;

        Logger::info("METADATA_RESET", &[]);
        Ok(written)
    }

    /// Write the default record without reading the device first.
    ///
    /// For blank or corrupted partitions that `reset` refuses to load.
    pub fn initialize(&mut self) -> BootResult<BootMetadata> {
        let written = self.persist(&BootMetadata::default())?;

        Logger::warn(
            "METADATA_INITIALIZED",
            &[("offset", self.offset.to_string().as_str())],
        );
        Ok(written)
    }
}
