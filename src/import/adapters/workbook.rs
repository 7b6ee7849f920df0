//! Office workbook reader built on `calamine`.

use crate::import::{
    domain::{CellValue, Sheet},
    ports::{SpreadsheetError, SpreadsheetReader},
};
use calamine::{Data, Reader, open_workbook_auto_from_rs};
use std::io::Cursor;

/// Reads the first worksheet of an `xlsx`/`xlsm`/`xlsb`/`xls`/`ods` file.
///
/// Cell positions are kept absolute: leading empty rows and columns before
/// the used range are padded with empty cells so the header is always the
/// sheet's first row. Padding rows span the full sheet width, so a sheet
/// whose data starts below row 1 gets placeholder headers.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkbookSheetReader;

impl WorkbookSheetReader {
    /// Creates a workbook reader.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SpreadsheetReader for WorkbookSheetReader {
    fn read(&self, bytes: &[u8]) -> Result<Sheet, SpreadsheetError> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or(SpreadsheetError::NoWorksheet)??;

        let Some((first_row, first_column)) = range.start() else {
            return Ok(Sheet::default());
        };
        let leading_columns = offset(first_column);
        let width = leading_columns.saturating_add(range.width());

        let mut rows = vec![vec![CellValue::Empty; width]; offset(first_row)];
        for source_row in range.rows() {
            let mut cells = vec![CellValue::Empty; leading_columns];
            cells.extend(source_row.iter().map(cell_from_data));
            rows.push(cells);
        }
        Ok(Sheet::from_rows(rows))
    }
}

fn offset(position: u32) -> usize {
    usize::try_from(position).unwrap_or_default()
}

fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(text) | Data::DateTimeIso(text) | Data::DurationIso(text) => {
            CellValue::text(text.as_str())
        }
        Data::Int(value) => CellValue::Integer(*value),
        Data::Float(value) => CellValue::Float(*value),
        Data::Bool(value) => CellValue::Bool(*value),
        Data::DateTime(value) => value
            .as_datetime()
            .map_or_else(|| CellValue::Float(value.as_f64()), CellValue::DateTime),
        Data::Error(err) => CellValue::Text(err.to_string()),
    }
}
