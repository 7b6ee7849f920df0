//! Tabular sheet read from a spreadsheet file.

use super::CellValue;

/// Grid of cells in file order. The first row holds the headers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    rows: Vec<Vec<CellValue>>,
}

/// One data row with its 1-based position in the source file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataRow<'a> {
    /// 1-based row number; the header is row 1.
    pub row_number: usize,
    /// Cells of the row, possibly shorter than the header.
    pub cells: &'a [CellValue],
}

impl DataRow<'_> {
    /// Returns the cell at a zero-based column, or empty when absent.
    #[must_use]
    pub fn cell(&self, column: usize) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        self.cells.get(column).unwrap_or(&EMPTY)
    }

    /// Returns `true` when every cell of the row is empty.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(CellValue::is_empty)
    }
}

impl Sheet {
    /// Builds a sheet from rows of cells.
    #[must_use]
    pub const fn from_rows(rows: Vec<Vec<CellValue>>) -> Self {
        Self { rows }
    }

    /// Returns `true` when the sheet has no rows at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the header row, empty when the sheet has no rows.
    #[must_use]
    pub fn header(&self) -> &[CellValue] {
        self.rows.first().map(Vec::as_slice).unwrap_or_default()
    }

    /// Iterates the data rows, skipping only the header row.
    pub fn data_rows(&self) -> impl Iterator<Item = DataRow<'_>> {
        self.rows
            .iter()
            .enumerate()
            .skip(1)
            .map(|(index, cells)| DataRow {
                row_number: index + 1,
                cells,
            })
    }
}
