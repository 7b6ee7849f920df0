//! Then steps for spreadsheet import BDD scenarios.

use super::world::{ImportWorld, run_async};
use rstest_bdd_macros::then;
use warehouse_dispatch::{import::domain::RowFailureKind, task::ports::TaskRepository};

#[then("{count:u64} tasks are stored")]
fn tasks_are_stored(world: &ImportWorld, count: u64) -> Result<(), eyre::Report> {
    let stored = run_async(world.tasks.repository().count())?;
    if stored != count {
        return Err(eyre::eyre!("expected {count} stored tasks, found {stored}"));
    }
    Ok(())
}

#[then("the import succeeds")]
fn import_succeeds(world: &ImportWorld) -> Result<(), eyre::Report> {
    let report = world.report()?;
    if !report.is_complete() {
        return Err(eyre::eyre!("unexpected failures {:?}", report.failures));
    }
    Ok(())
}

#[then("the import fails at row {row:usize}")]
fn import_fails_at_row(world: &ImportWorld, row: usize) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing import result"))?;

    match result {
        Err(err) if err.row() == Some(row) => Ok(()),
        other => Err(eyre::eyre!("expected failure at row {row}, got {other:?}")),
    }
}

#[then("row {row:usize} is reported as a duplicate task number")]
fn row_reported_as_duplicate(world: &ImportWorld, row: usize) -> Result<(), eyre::Report> {
    let report = world.report()?;
    let reported = report
        .failures
        .iter()
        .any(|failure| failure.row == row && failure.kind == RowFailureKind::DuplicateTaskNumber);
    if !reported {
        return Err(eyre::eyre!(
            "row {row} not reported as duplicate: {:?}",
            report.failures
        ));
    }
    Ok(())
}

#[then("{count:usize} blank rows are skipped")]
fn blank_rows_skipped(world: &ImportWorld, count: usize) -> Result<(), eyre::Report> {
    let report = world.report()?;
    if report.skipped_blank_rows != count {
        return Err(eyre::eyre!(
            "expected {count} skipped rows, found {}",
            report.skipped_blank_rows
        ));
    }
    Ok(())
}
