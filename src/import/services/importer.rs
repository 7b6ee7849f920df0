//! Bulk task creation and preview over spreadsheet files.

use crate::import::{
    domain::{
        DataRow, ImportPolicy, ImportReport, RowFailure, RowFailureKind, SheetPreview,
    },
    ports::{SpreadsheetError, SpreadsheetReader},
};
use crate::task::{
    domain::NewTask,
    ports::{TaskRepository, TaskRepositoryError},
    services::{CreateTaskRequest, TaskLifecycleError, TaskLifecycleService},
};
use mockable::Clock;
use thiserror::Error;
use tracing::{info, instrument, warn};

/// Column holding the task number.
const TASK_NUMBER_COLUMN: usize = 0;
/// Column holding the optional comment.
const COMMENT_COLUMN: usize = 1;

/// Errors returned by spreadsheet import operations.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The file could not be decoded.
    #[error(transparent)]
    Spreadsheet(#[from] SpreadsheetError),

    /// A row could not be turned into a task; nothing was stored.
    #[error("import failed at row {row}: {source}")]
    ImportFailure {
        /// 1-based spreadsheet row number; the header is row 1.
        row: usize,
        /// Failure reported for the row.
        #[source]
        source: TaskLifecycleError,
    },

    /// The store failed independently of any particular row.
    #[error(transparent)]
    Store(TaskLifecycleError),
}

impl ImportError {
    /// Returns the HTTP status code a transport layer should report.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Spreadsheet(_) => 400,
            Self::ImportFailure { source, .. } => match source.status_code() {
                500 => 500,
                _ => 422,
            },
            Self::Store(source) => source.status_code(),
        }
    }

    /// Returns the failing row, when the failure is tied to one.
    #[must_use]
    pub const fn row(&self) -> Option<usize> {
        match self {
            Self::ImportFailure { row, .. } => Some(*row),
            Self::Spreadsheet(_) | Self::Store(_) => None,
        }
    }
}

/// A non-blank data row mapped onto a create request.
#[derive(Debug, Clone)]
struct RowCandidate {
    row: usize,
    task_number: String,
    request: CreateTaskRequest,
}

impl RowCandidate {
    fn from_row(row: &DataRow<'_>) -> Self {
        let task_number = row.cell(TASK_NUMBER_COLUMN).as_text();
        let mut request = CreateTaskRequest::new(task_number.clone());
        if let Some(comment) = row.cell(COMMENT_COLUMN).non_empty_text() {
            request = request.with_comment(comment);
        }
        Self {
            row: row.row_number,
            task_number,
            request,
        }
    }
}

/// Extracts headers and header-to-text row mappings without touching any
/// store.
///
/// # Errors
///
/// Returns [`ImportError::Spreadsheet`] when the file cannot be decoded.
pub fn preview(
    reader: &impl SpreadsheetReader,
    bytes: &[u8],
) -> Result<SheetPreview, ImportError> {
    let sheet = reader.read(bytes)?;
    Ok(SheetPreview::from_sheet(&sheet))
}

/// Spreadsheet import orchestration service.
///
/// Writes through [`TaskLifecycleService`], so imported tasks receive the
/// same validation and defaults as tasks created one at a time.
pub struct SpreadsheetImportService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    tasks: TaskLifecycleService<R, C>,
}

impl<R, C> Clone for SpreadsheetImportService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            tasks: self.tasks.clone(),
        }
    }
}

impl<R, C> SpreadsheetImportService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates an import service writing through `tasks`.
    #[must_use]
    pub const fn new(tasks: TaskLifecycleService<R, C>) -> Self {
        Self { tasks }
    }

    /// Creates one task per data row.
    ///
    /// Column 1 is the task number and column 2 the optional comment; every
    /// other field takes its default. Rows whose cells are all empty are
    /// skipped. Created identifiers are reported in file order.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::Spreadsheet`] when the file cannot be decoded.
    /// Under [`ImportPolicy::AllOrNothing`], returns
    /// [`ImportError::ImportFailure`] for the first rejected row, after which
    /// nothing has been stored. Under [`ImportPolicy::BestEffort`], row
    /// failures are collected in the report instead.
    #[instrument(skip_all, fields(policy = ?policy))]
    pub async fn bulk_create(
        &self,
        reader: &impl SpreadsheetReader,
        bytes: &[u8],
        policy: ImportPolicy,
    ) -> Result<ImportReport, ImportError> {
        let sheet = reader.read(bytes)?;

        let mut report = ImportReport::default();
        let mut candidates = Vec::new();
        for row in sheet.data_rows() {
            if row.is_blank() {
                report.skipped_blank_rows += 1;
                continue;
            }
            candidates.push(RowCandidate::from_row(&row));
        }

        match policy {
            ImportPolicy::AllOrNothing => self.import_atomically(&candidates, &mut report).await?,
            ImportPolicy::BestEffort => self.import_row_by_row(candidates, &mut report).await,
        }

        info!(
            created = report.created.len(),
            failed = report.failures.len(),
            skipped = report.skipped_blank_rows,
            "spreadsheet import finished"
        );
        Ok(report)
    }

    async fn import_atomically(
        &self,
        candidates: &[RowCandidate],
        report: &mut ImportReport,
    ) -> Result<(), ImportError> {
        let drafts = candidates
            .iter()
            .map(|candidate| {
                self.tasks
                    .prepare(candidate.request.clone())
                    .map_err(|source| ImportError::ImportFailure {
                        row: candidate.row,
                        source,
                    })
            })
            .collect::<Result<Vec<NewTask>, ImportError>>()?;

        let created = self
            .tasks
            .create_all(&drafts)
            .await
            .map_err(|err| locate_batch_failure(candidates, err))?;
        report.created = created.iter().map(|task| task.id()).collect();
        Ok(())
    }

    async fn import_row_by_row(&self, candidates: Vec<RowCandidate>, report: &mut ImportReport) {
        for candidate in candidates {
            match self.tasks.create(candidate.request).await {
                Ok(task) => report.created.push(task.id()),
                Err(err) => {
                    warn!(row = candidate.row, error = %err, "spreadsheet row not imported");
                    report.failures.push(RowFailure {
                        row: candidate.row,
                        task_number: candidate.task_number,
                        kind: classify(&err),
                        message: err.to_string(),
                    });
                }
            }
        }
    }
}

/// Maps a batch rejection back onto the spreadsheet row it came from.
fn locate_batch_failure(candidates: &[RowCandidate], err: TaskLifecycleError) -> ImportError {
    match err {
        TaskLifecycleError::Repository(TaskRepositoryError::BatchRowRejected { index, source }) => {
            match candidates.get(index) {
                Some(candidate) => ImportError::ImportFailure {
                    row: candidate.row,
                    source: TaskLifecycleError::Repository(*source),
                },
                None => ImportError::Store(TaskLifecycleError::Repository(*source)),
            }
        }
        other => ImportError::Store(other),
    }
}

fn classify(err: &TaskLifecycleError) -> RowFailureKind {
    match err {
        TaskLifecycleError::Repository(TaskRepositoryError::DuplicateTaskNumber(_)) => {
            RowFailureKind::DuplicateTaskNumber
        }
        TaskLifecycleError::Domain(_) | TaskLifecycleError::InvalidStatus(_) => {
            RowFailureKind::InvalidRow
        }
        TaskLifecycleError::NotFound(_) | TaskLifecycleError::Repository(_) => {
            RowFailureKind::Persistence
        }
    }
}
