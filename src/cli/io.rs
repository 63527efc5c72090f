//! Status rendering for the CLI
//!
//! Text output is line-oriented for shell scripts; JSON output is a
//! single pretty-printed object.

use std::io::{self, Write};

use serde::Serialize;

use super::errors::CliResult;
use crate::metadata::{self, BootMetadata, Slot, SlotRecord};
use crate::policy;

/// JSON view of one slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotReport {
    pub priority: u8,
    pub tries_remaining: u8,
    pub successful_boot: u8,
}

impl From<&SlotRecord> for SlotReport {
    fn from(slot: &SlotRecord) -> Self {
        Self {
            priority: slot.priority,
            tries_remaining: slot.tries_remaining,
            successful_boot: slot.successful_boot,
        }
    }
}

/// JSON view of the whole record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub active_slot: usize,
    pub active_slot_letter: String,
    pub version_major: u8,
    pub version_minor: u8,
    pub slots: Vec<SlotReport>,
    pub crc32: u32,
    pub crc32_matches: bool,
}

impl StatusReport {
    pub fn new(record: &BootMetadata) -> Self {
        let active = policy::active_slot(record);
        Self {
            active_slot: active.index(),
            active_slot_letter: active.letter().to_string(),
            version_major: record.version_major,
            version_minor: record.version_minor,
            slots: record.slots.iter().map(SlotReport::from).collect(),
            crc32: record.crc32,
            crc32_matches: metadata::verify_checksum(record),
        }
    }
}

/// Render the human-readable status
pub fn render_status_text(metadata: &BootMetadata) -> String {
    let active = policy::active_slot(metadata);
    let mut out = String::new();

    out.push_str(&format!("active slot number: {}\n", active.index()));
    out.push_str(&format!("active slot letter: {}\n", active.letter()));

    for slot in Slot::ALL {
        let record = metadata.slot(slot);
        let name = slot.letter().to_ascii_lowercase();
        out.push('\n');
        out.push_str(&format!("slot {} priority = {}\n", name, record.priority));
        out.push_str(&format!(
            "slot {} tries_remaining = {}\n",
            name, record.tries_remaining
        ));
        out.push_str(&format!(
            "slot {} successful_boot = {}\n",
            name,
            record.successful_boot
        ));
    }

    out
}

/// Render the JSON status
pub fn render_status_json(metadata: &BootMetadata) -> CliResult<String> {
    Ok(serde_json::to_string_pretty(&StatusReport::new(metadata))?)
}

/// Write the status to stdout in the chosen format
pub fn write_status(metadata: &BootMetadata, json: bool) -> CliResult<()> {
    let rendered = if json {
        let mut s = render_status_json(metadata)?;
        s.push('\n');
        s
    } else {
        render_status_text(metadata)
    };

    let mut stdout = io::stdout();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_lists_active_and_both_slots() {
        let text = render_status_text(&BootMetadata::default());
        assert!(text.starts_with("active slot number: 0\nactive slot letter: A\n"));
        assert!(text.contains("slot a priority = 15\n"));
        assert!(text.contains("slot b priority = 14\n"));
        assert!(text.contains("slot b tries_remaining = 7\n"));
        assert!(text.contains("slot a successful_boot = 0\n"));
    }

    #[test]
    fn test_json_report_fields() {
        let meta = metadata::stamp(&policy::set_active_slot(&BootMetadata::default(), Slot::B));
        let json = render_status_json(&meta).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["active_slot"], 1);
        assert_eq!(parsed["active_slot_letter"], "B");
        assert_eq!(parsed["version_major"], 1);
        assert_eq!(parsed["slots"][1]["priority"], 15);
        assert_eq!(parsed["slots"][0]["priority"], 14);
        assert_eq!(parsed["crc32"], meta.crc32);
        assert_eq!(parsed["crc32_matches"], true);
    }

    #[test]
    fn test_raw_success_flag_reported_as_stored() {
        let mut meta = BootMetadata::default();
        meta.slot_mut(Slot::B).successful_boot = 2;

        assert!(render_status_text(&meta).contains("slot b successful_boot = 2\n"));
        assert_eq!(StatusReport::new(&meta).slots[1].successful_boot, 2);
    }

    #[test]
    fn test_json_reports_unstamped_crc() {
        let report = StatusReport::new(&BootMetadata::default());
        assert!(!report.crc32_matches);
        assert_eq!(report.slots.len(), 2);
    }
}
