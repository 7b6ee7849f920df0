//! Adapter implementations of the spreadsheet reader port.

mod auto;
mod delimited;
mod workbook;

pub use auto::AutoSheetReader;
pub use delimited::CsvSheetReader;
pub use workbook::WorkbookSheetReader;
