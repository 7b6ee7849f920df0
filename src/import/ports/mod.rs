//! Port contracts for spreadsheet ingestion.

pub mod reader;

pub use reader::{SpreadsheetError, SpreadsheetReader};
