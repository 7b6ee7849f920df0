//! Reader port turning raw spreadsheet bytes into a [`Sheet`].

use crate::import::domain::{Sheet, UnsupportedFormatError};
use thiserror::Error;

/// Spreadsheet decoding contract.
///
/// Implementations return every row of the first sheet in file order,
/// header row included.
pub trait SpreadsheetReader: Send + Sync {
    /// Decodes the spreadsheet held in `bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`SpreadsheetError`] when the bytes are not a readable
    /// spreadsheet of the adapter's format.
    fn read(&self, bytes: &[u8]) -> Result<Sheet, SpreadsheetError>;
}

/// Errors returned by spreadsheet reader implementations.
#[derive(Debug, Error)]
pub enum SpreadsheetError {
    /// The file format is not supported.
    #[error(transparent)]
    UnsupportedFormat(#[from] UnsupportedFormatError),

    /// Delimited text could not be parsed.
    #[error("failed to read delimited rows: {0}")]
    Delimited(#[from] csv::Error),

    /// The workbook could not be opened or decoded.
    #[error("failed to read workbook: {0}")]
    Workbook(#[from] calamine::Error),

    /// The workbook contains no worksheet.
    #[error("workbook contains no worksheet")]
    NoWorksheet,
}
