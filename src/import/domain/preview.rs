//! Read-only header/value view of a sheet for client-side review.

use super::Sheet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Header names and per-row header-to-text mappings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetPreview {
    /// Header names in column order.
    pub headers: Vec<String>,
    /// One mapping per data row, in file order.
    pub items: Vec<BTreeMap<String, String>>,
}

/// Placeholder name for a column without a header, numbered from 1.
#[must_use]
pub fn placeholder_header(column: usize) -> String {
    format!("col{}", column + 1)
}

impl SheetPreview {
    /// Extracts headers and row mappings from a sheet.
    ///
    /// Blank header cells are named `colN`. Every item carries every header;
    /// cells missing from a short row map to `""`. Cells beyond the last
    /// header are keyed by their placeholder name. When two headers share a
    /// name the rightmost cell wins.
    #[must_use]
    pub fn from_sheet(sheet: &Sheet) -> Self {
        let headers: Vec<String> = sheet
            .header()
            .iter()
            .enumerate()
            .map(|(column, cell)| {
                cell.non_empty_text()
                    .unwrap_or_else(|| placeholder_header(column))
            })
            .collect();

        let items = sheet
            .data_rows()
            .map(|row| {
                let width = headers.len().max(row.cells.len());
                (0..width)
                    .map(|column| {
                        let key = headers
                            .get(column)
                            .cloned()
                            .unwrap_or_else(|| placeholder_header(column));
                        (key, row.cell(column).as_text())
                    })
                    .collect()
            })
            .collect();

        Self { headers, items }
    }
}
