//! Spreadsheet ingestion for the dispatch backend.
//!
//! Operators upload a tabular file whose first row holds headers. The
//! importer either creates one task per data row (bulk create) or returns
//! the rows as header/value mappings for review (preview). Layout follows
//! the task module:
//!
//! - Domain types in [`domain`]
//! - The reader port in [`ports`]
//! - Delimited and workbook readers in [`adapters`]
//! - Orchestration in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
