//! Boot metadata error types
//!
//! Error codes:
//! - SLOT_DEVICE_OPEN_FAILED
//! - SLOT_DEVICE_READ_FAILED
//! - SLOT_DEVICE_WRITE_FAILED
//! - SLOT_PARSE_FAILED
//! - SLOT_VALIDATION_FAILED
//! - SLOT_INVALID_ARGUMENT
//!
//! Every error is terminal for the current invocation. Nothing is
//! persisted once any of these has been raised.

use std::fmt;
use std::io;

use thiserror::Error;

/// Reasons a decoded record is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// First four bytes are not the metadata magic
    #[error("bad magic {found:02x?}")]
    BadMagic { found: [u8; 4] },

    /// Major version is newer than this build understands
    #[error("unsupported major version {major} (supported: {supported})")]
    UnsupportedVersion { major: u8, supported: u8 },
}

/// Boot metadata error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootErrorCode {
    /// Backing device could not be opened
    DeviceOpenFailed,
    /// Backing device could not be read
    DeviceReadFailed,
    /// Backing device could not be written
    DeviceWriteFailed,
    /// Fewer bytes than a full record were supplied
    ParseFailed,
    /// Decoded record failed validation
    ValidationFailed,
    /// Caller supplied an out-of-range slot or boot result
    InvalidArgument,
}

impl BootErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            BootErrorCode::DeviceOpenFailed => "SLOT_DEVICE_OPEN_FAILED",
            BootErrorCode::DeviceReadFailed => "SLOT_DEVICE_READ_FAILED",
            BootErrorCode::DeviceWriteFailed => "SLOT_DEVICE_WRITE_FAILED",
            BootErrorCode::ParseFailed => "SLOT_PARSE_FAILED",
            BootErrorCode::ValidationFailed => "SLOT_VALIDATION_FAILED",
            BootErrorCode::InvalidArgument => "SLOT_INVALID_ARGUMENT",
        }
    }
}

impl fmt::Display for BootErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Boot metadata error with context
#[derive(Debug)]
pub struct BootError {
    /// Error code
    code: BootErrorCode,
    /// Human-readable message
    message: String,
    /// Optional details about the error context
    details: Option<String>,
    /// Underlying IO error if applicable
    source: Option<io::Error>,
}

impl BootError {
    fn new(code: BootErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
            source: None,
        }
    }

    /// Device could not be opened
    pub fn device_open_failed(path: impl Into<String>, source: io::Error) -> Self {
        let mut err = Self::new(BootErrorCode::DeviceOpenFailed, "failed to open device");
        err.details = Some(format!("path: {}", path.into()));
        err.source = Some(source);
        err
    }

    /// Device could not be read
    pub fn device_read_failed(message: impl Into<String>, source: io::Error) -> Self {
        let mut err = Self::new(BootErrorCode::DeviceReadFailed, message);
        err.source = Some(source);
        err
    }

    /// Device read request was out of range (no IO source)
    pub fn device_read_out_of_range(offset: u64, len: usize, size: usize) -> Self {
        let mut err = Self::new(
            BootErrorCode::DeviceReadFailed,
            "window extends past end of buffer",
        );
        err.details = Some(format!("offset: {}, len: {}, buffer_size: {}", offset, len, size));
        err
    }

    /// Device could not be written
    pub fn device_write_failed(message: impl Into<String>, source: io::Error) -> Self {
        let mut err = Self::new(BootErrorCode::DeviceWriteFailed, message);
        err.source = Some(source);
        err
    }

    /// Device write request was out of range (no IO source)
    pub fn device_write_out_of_range(offset: u64, len: usize, size: usize) -> Self {
        let mut err = Self::new(
            BootErrorCode::DeviceWriteFailed,
            "window extends past end of buffer",
        );
        err.details = Some(format!("offset: {}, len: {}, buffer_size: {}", offset, len, size));
        err
    }

    /// Input shorter than a full record
    pub fn parse_failed(got: usize, need: usize) -> Self {
        let mut err = Self::new(BootErrorCode::ParseFailed, "metadata record truncated");
        err.details = Some(format!("got {} bytes, need {}", got, need));
        err
    }

    /// Record rejected by the validator
    pub fn validation_failed(reason: ValidationError) -> Self {
        Self::new(BootErrorCode::ValidationFailed, reason.to_string())
    }

    /// Caller supplied an unrecognized argument value
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(BootErrorCode::InvalidArgument, message)
    }

    /// Returns the error code
    pub fn code(&self) -> BootErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns additional error details
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }
}

impl fmt::Display for BootError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        if let Some(ref source) = self.source {
            write!(f, ": {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for BootError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

impl From<ValidationError> for BootError {
    fn from(reason: ValidationError) -> Self {
        BootError::validation_failed(reason)
    }
}

/// Result type for boot metadata operations
pub type BootResult<T> = Result<T, BootError>;
