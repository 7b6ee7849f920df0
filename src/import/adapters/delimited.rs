//! Delimited-text reader built on the `csv` crate.

use crate::import::{
    domain::{CellValue, Sheet},
    ports::{SpreadsheetError, SpreadsheetReader},
};
use csv::{ReaderBuilder, StringRecord};
use std::iter;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Reads comma- (or otherwise) delimited text into a [`Sheet`].
///
/// Every field is text; empty fields become [`CellValue::Empty`]. Rows may
/// have differing lengths. Empty lines are kept as blank rows so row numbers
/// match the line a spreadsheet application would show.
#[derive(Debug, Clone, Copy)]
pub struct CsvSheetReader {
    delimiter: u8,
}

impl CsvSheetReader {
    /// Creates a comma-delimited reader.
    #[must_use]
    pub const fn new() -> Self {
        Self { delimiter: b',' }
    }

    /// Uses a different single-byte field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Returns the configured field delimiter.
    #[must_use]
    pub const fn delimiter(&self) -> u8 {
        self.delimiter
    }
}

impl Default for CsvSheetReader {
    fn default() -> Self {
        Self::new()
    }
}

impl SpreadsheetReader for CsvSheetReader {
    fn read(&self, bytes: &[u8]) -> Result<Sheet, SpreadsheetError> {
        let input = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_reader(input);

        let mut rows = Vec::new();
        let mut record = StringRecord::new();
        while reader.read_record(&mut record)? {
            let start = record
                .position()
                .and_then(|position| usize::try_from(position.byte()).ok())
                .unwrap_or_default();
            let skipped = blank_lines_before(input, start);
            rows.extend(iter::repeat_with(Vec::new).take(skipped));
            rows.push(record.iter().map(CellValue::text).collect());
        }
        Ok(Sheet::from_rows(rows))
    }
}

/// Counts the empty lines the parser skipped before the record read from
/// `start`.
///
/// The parser consumes empty lines together with the next record, so they sit
/// between `start` and the first byte of the record. A `\n` left over from the
/// previous record's `\r\n` terminator is not a line of its own.
fn blank_lines_before(input: &[u8], start: usize) -> usize {
    let rest = input.get(start..).unwrap_or_default();
    let run_length = rest
        .iter()
        .take_while(|byte| matches!(byte, b'\r' | b'\n'))
        .count();
    let mut run = rest.get(..run_length).unwrap_or_default();
    let after_carriage_return = start
        .checked_sub(1)
        .and_then(|index| input.get(index))
        .is_some_and(|byte| *byte == b'\r');
    if after_carriage_return {
        run = run.strip_prefix(b"\n").unwrap_or(run);
    }

    let mut lines = 0;
    let mut bytes = run.iter().peekable();
    while let Some(byte) = bytes.next() {
        if *byte == b'\r' {
            bytes.next_if_eq(&&b'\n');
        }
        lines += 1;
    }
    lines
}
