//! Domain model for spreadsheet ingestion.
//!
//! A [`Sheet`] is the format-neutral grid produced by reader adapters. The
//! importer turns it into task drafts or into a [`SheetPreview`].

mod cell;
mod error;
mod format;
mod preview;
mod report;
mod sheet;

pub use cell::CellValue;
pub use error::UnsupportedFormatError;
pub use format::SheetFormat;
pub use preview::{SheetPreview, placeholder_header};
pub use report::{ImportPolicy, ImportReport, RowFailure, RowFailureKind};
pub use sheet::{DataRow, Sheet};
