//! Error types for spreadsheet domain values.

use thiserror::Error;

/// Error returned when a file name does not map to a known format.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unsupported spreadsheet format: {0}")]
pub struct UnsupportedFormatError(pub String);
