//! Structural validation of a decoded record
//!
//! Only the magic and the major version are checked. The minor version,
//! reserved bytes, slot values and the checksum are accepted as found.

use super::errors::ValidationError;
use super::layout::{MAGIC, MAJOR_VERSION};
use super::record::BootMetadata;

/// Validate a decoded record.
///
/// Magic is checked before version, so a record failing both reports
/// `BadMagic`.
pub fn validate(metadata: &BootMetadata) -> Result<(), ValidationError> {
    if metadata.magic != MAGIC {
        return Err(ValidationError::BadMagic {
            found: metadata.magic,
        });
    }

    if metadata.version_major > MAJOR_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            major: metadata.version_major,
            supported: MAJOR_VERSION,
        });
    }

    Ok(())
}
