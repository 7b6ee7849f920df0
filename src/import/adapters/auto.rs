//! Reader that picks an adapter from the file name.

use super::{CsvSheetReader, WorkbookSheetReader};
use crate::import::{
    domain::{Sheet, SheetFormat},
    ports::{SpreadsheetError, SpreadsheetReader},
};
use std::path::Path;

/// Dispatches to the delimited or workbook reader.
#[derive(Debug, Clone, Copy)]
pub enum AutoSheetReader {
    /// Delimited text.
    Delimited(CsvSheetReader),
    /// Office workbook.
    Workbook(WorkbookSheetReader),
}

impl AutoSheetReader {
    /// Chooses a reader for `path` by its extension.
    ///
    /// `.tsv` files are read with a tab delimiter; other delimited files use
    /// `delimiter`.
    ///
    /// # Errors
    ///
    /// Returns [`SpreadsheetError::UnsupportedFormat`] for unknown
    /// extensions.
    pub fn for_path(path: impl AsRef<Path>, delimiter: u8) -> Result<Self, SpreadsheetError> {
        let file_path = path.as_ref();
        match SheetFormat::from_path(file_path)? {
            SheetFormat::Delimited => {
                let field_delimiter = if SheetFormat::is_tab_separated(file_path) {
                    b'\t'
                } else {
                    delimiter
                };
                Ok(Self::Delimited(
                    CsvSheetReader::new().with_delimiter(field_delimiter),
                ))
            }
            SheetFormat::Workbook => Ok(Self::Workbook(WorkbookSheetReader::new())),
        }
    }

    /// Returns the format this reader handles.
    #[must_use]
    pub const fn format(&self) -> SheetFormat {
        match self {
            Self::Delimited(_) => SheetFormat::Delimited,
            Self::Workbook(_) => SheetFormat::Workbook,
        }
    }
}

impl SpreadsheetReader for AutoSheetReader {
    fn read(&self, bytes: &[u8]) -> Result<Sheet, SpreadsheetError> {
        match self {
            Self::Delimited(reader) => reader.read(bytes),
            Self::Workbook(reader) => reader.read(bytes),
        }
    }
}
