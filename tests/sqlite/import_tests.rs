//! `SQLite` integration tests for spreadsheet import.

use super::helpers::{SqliteContext, context};
use eyre::{ensure, eyre};
use rstest::rstest;
use warehouse_dispatch::{
    import::{
        adapters::CsvSheetReader,
        domain::{ImportPolicy, RowFailureKind},
        services::{ImportError, SpreadsheetImportService},
    },
    task::{
        ports::{TaskRepository, TaskRepositoryError},
        services::TaskLifecycleError,
    },
};

const DUPLICATED: &[u8] = b"number,comment\nT-1,first\nT-1,second\n";

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn all_or_nothing_rolls_back_on_duplicate_row(
    #[future] context: eyre::Result<SqliteContext>,
) -> eyre::Result<()> {
    let ctx = context.await?;
    let importer = SpreadsheetImportService::new(ctx.service.clone());

    let result = importer
        .bulk_create(&CsvSheetReader::new(), DUPLICATED, ImportPolicy::AllOrNothing)
        .await;

    let Err(ImportError::ImportFailure { row, source }) = &result else {
        return Err(eyre!("expected ImportFailure, got {result:?}"));
    };
    ensure!(*row == 3, "expected row 3, got {row}");
    ensure!(
        matches!(
            source,
            TaskLifecycleError::Repository(TaskRepositoryError::DuplicateTaskNumber(_))
        ),
        "unexpected cause {source:?}"
    );
    ensure!(ctx.repository.count().await? == 0, "import was not rolled back");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn best_effort_keeps_first_duplicate(
    #[future] context: eyre::Result<SqliteContext>,
) -> eyre::Result<()> {
    let ctx = context.await?;
    let importer = SpreadsheetImportService::new(ctx.service.clone());

    let report = importer
        .bulk_create(&CsvSheetReader::new(), DUPLICATED, ImportPolicy::BestEffort)
        .await?;

    ensure!(report.created.len() == 1, "expected one stored row");
    let kinds: Vec<(usize, RowFailureKind)> = report
        .failures
        .iter()
        .map(|failure| (failure.row, failure.kind))
        .collect();
    ensure!(
        kinds == [(3, RowFailureKind::DuplicateTaskNumber)],
        "unexpected failures {kinds:?}"
    );

    let stored = ctx.repository.list(None).await?;
    let first = stored.first().ok_or_else(|| eyre!("nothing stored"))?;
    ensure!(first.comment() == Some("first"), "wrong row kept");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn imported_ids_follow_file_order(
    #[future] context: eyre::Result<SqliteContext>,
) -> eyre::Result<()> {
    let ctx = context.await?;
    let importer = SpreadsheetImportService::new(ctx.service.clone());
    let input = "номер,комментарий\nЗ-3,третий\nЗ-1,\nЗ-2,второй\n";

    let report = importer
        .bulk_create(&CsvSheetReader::new(), input.as_bytes(), ImportPolicy::default())
        .await?;

    let mut numbers = Vec::new();
    for id in &report.created {
        let task = ctx
            .repository
            .find_by_id(*id)
            .await?
            .ok_or_else(|| eyre!("task {id} missing"))?;
        numbers.push(task.task_number().as_str().to_owned());
    }
    ensure!(numbers == ["З-3", "З-1", "З-2"], "order lost: {numbers:?}");
    Ok(())
}
