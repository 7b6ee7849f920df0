//! Application services for spreadsheet ingestion.

mod importer;

pub use importer::{ImportError, SpreadsheetImportService, preview};
