//! Bulk import policies and outcome reports.

use crate::task::domain::TaskId;
use serde::{Deserialize, Serialize};

/// How a bulk import reacts to rows the store refuses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportPolicy {
    /// Validate every row, then store all rows in one atomic batch. The
    /// first failing row aborts the import and nothing is stored.
    #[default]
    AllOrNothing,
    /// Store rows one at a time and report the rows that failed.
    BestEffort,
}

/// Reason a row was not imported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowFailureKind {
    /// The task number already exists, in the store or earlier in the file.
    DuplicateTaskNumber,
    /// The row does not describe a valid task (for example a blank number).
    InvalidRow,
    /// The store failed for a reason unrelated to the row's content.
    Persistence,
}

/// A row that was not imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowFailure {
    /// 1-based spreadsheet row number; the header is row 1.
    pub row: usize,
    /// Task number text read from the row.
    pub task_number: String,
    /// Classification of the failure.
    pub kind: RowFailureKind,
    /// Human-readable failure message.
    pub message: String,
}

/// Outcome of a bulk import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    /// Identifiers of created tasks, in file order.
    pub created: Vec<TaskId>,
    /// Rows that were not imported, in file order.
    pub failures: Vec<RowFailure>,
    /// Number of blank rows that were skipped.
    pub skipped_blank_rows: usize,
}

impl ImportReport {
    /// Returns `true` when every non-blank row was imported.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}
