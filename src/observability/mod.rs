//! Observability for slotctl
//!
//! Structured JSON logging only. Logging is read-only: it never changes
//! what an operation does or whether it succeeds.
//!
//! ```ignore
//! use slotctl::observability::Logger;
//!
//! Logger::info("SLOT_ACTIVATED", &[("slot", "B")]);
//! ```

mod logger;

pub use logger::{Logger, Severity, LOG_LEVEL_ENV};
