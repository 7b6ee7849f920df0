//! Spreadsheet file formats recognised by the importer.

use super::UnsupportedFormatError;
use std::fmt;
use std::path::Path;

/// Container format of an uploaded spreadsheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetFormat {
    /// Delimited text (`.csv`, `.tsv`, `.txt`).
    Delimited,
    /// Office workbook (`.xlsx`, `.xlsm`, `.xlsb`, `.xls`, `.ods`).
    Workbook,
}

impl SheetFormat {
    /// Detects the format from a file name's extension, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedFormatError`] when the extension is missing or
    /// unknown.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, UnsupportedFormatError> {
        let file_path = path.as_ref();
        let extension = file_path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "csv" | "tsv" | "txt" => Ok(Self::Delimited),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(Self::Workbook),
            _ => Err(UnsupportedFormatError(file_path.display().to_string())),
        }
    }

    /// Returns `true` for tab-separated files, which need a tab delimiter.
    #[must_use]
    pub fn is_tab_separated(path: impl AsRef<Path>) -> bool {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("tsv"))
    }
}

impl fmt::Display for SheetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delimited => f.write_str("delimited"),
            Self::Workbook => f.write_str("workbook"),
        }
    }
}
