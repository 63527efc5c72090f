//! Boot result reported by the updater after a boot attempt

use std::fmt;

use super::slots::{active_slot, failover, set_successful_boot};
use crate::metadata::{BootError, BootMetadata, BootResult};

/// Outcome of the last boot of the active slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootOutcome {
    /// Boot failed; switch to the other slot
    Failure,
    /// Boot succeeded; pin the active slot
    Success,
}

impl BootOutcome {
    /// Parse `0`/`1` or `failure`/`success`
    pub fn parse(input: &str) -> BootResult<Self> {
        match input.trim() {
            "0" | "failure" => Ok(BootOutcome::Failure),
            "1" | "success" => Ok(BootOutcome::Success),
            other => Err(BootError::invalid_argument(format!(
                "invalid boot result '{}': 0 for failure, 1 for success",
                other
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BootOutcome::Failure => "failure",
            BootOutcome::Success => "success",
        }
    }
}

impl fmt::Display for BootOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Apply a boot result to the currently active slot.
///
/// Success marks the active slot good. Failure fails over to the other slot.
pub fn apply_boot_outcome(metadata: &BootMetadata, outcome: BootOutcome) -> BootMetadata {
    match outcome {
        BootOutcome::Success => set_successful_boot(metadata, active_slot(metadata)),
        BootOutcome::Failure => failover(metadata),
    }
}
