//! In-memory integration tests for spreadsheet import through real readers.

use super::helpers::{TestImporter, TestService, create_numbers, service};
use eyre::{ensure, eyre};
use rstest::rstest;
use warehouse_dispatch::{
    import::{
        adapters::{AutoSheetReader, CsvSheetReader, WorkbookSheetReader},
        domain::{ImportPolicy, RowFailureKind},
        services::{ImportError, SpreadsheetImportService, preview},
    },
    task::ports::TaskRepository,
};

const DUPLICATED: &[u8] = b"number,comment\nT-1,first\nT-1,second\n";

fn importer(service: &TestService) -> TestImporter {
    SpreadsheetImportService::new(service.clone())
}

async fn stored_numbers(service: &TestService) -> eyre::Result<Vec<String>> {
    let mut numbers: Vec<String> = service
        .list(None)
        .await?
        .iter()
        .map(|task| task.task_number().as_str().to_owned())
        .collect();
    numbers.sort();
    Ok(numbers)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn csv_rows_become_tasks(service: TestService) -> eyre::Result<()> {
    let input = b"number,comment,ignored\nT-1,rush,x\nT-2,,y\n,,\nT-3\n";

    let report = importer(&service)
        .bulk_create(&CsvSheetReader::new(), input, ImportPolicy::default())
        .await?;

    ensure!(report.created.len() == 3, "expected three tasks, got {report:?}");
    ensure!(report.skipped_blank_rows == 1, "blank row not skipped");
    ensure!(stored_numbers(&service).await? == ["T-1", "T-2", "T-3"], "numbers differ");

    let first_id = *report.created.first().ok_or_else(|| eyre!("no ids"))?;
    let first = service.get(first_id).await?;
    ensure!(first.comment() == Some("rush"), "comment not imported");
    let second_id = *report.created.get(1).ok_or_else(|| eyre!("missing id"))?;
    ensure!(service.get(second_id).await?.comment().is_none(), "empty comment stored");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn all_or_nothing_duplicate_stores_nothing(service: TestService) -> eyre::Result<()> {
    let result = importer(&service)
        .bulk_create(&CsvSheetReader::new(), DUPLICATED, ImportPolicy::AllOrNothing)
        .await;

    let Err(err) = result else {
        return Err(eyre!("duplicate file should fail"));
    };
    ensure!(err.row() == Some(3), "expected row 3, got {err}");
    ensure!(
        service.repository().count().await? == 0,
        "nothing should be stored"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_csv_lines_keep_row_numbers(service: TestService) -> eyre::Result<()> {
    let input = b"number,comment\nT-1,a\n\nT-1,b\n";

    let result = importer(&service)
        .bulk_create(&CsvSheetReader::new(), input, ImportPolicy::AllOrNothing)
        .await;

    let Err(err) = result else {
        return Err(eyre!("duplicate file should fail"));
    };
    ensure!(err.row() == Some(4), "expected row 4, got {err}");
    ensure!(service.repository().count().await? == 0, "nothing should be stored");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_csv_lines_count_as_skipped_rows(service: TestService) -> eyre::Result<()> {
    let report = importer(&service)
        .bulk_create(
            &CsvSheetReader::new(),
            b"number,comment\n\nT-9,x\n",
            ImportPolicy::BestEffort,
        )
        .await?;

    ensure!(report.skipped_blank_rows == 1, "blank line not counted: {report:?}");
    ensure!(report.created.len() == 1, "data row not stored");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn workbook_rows_become_tasks(service: TestService) -> eyre::Result<()> {
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Number")?;
    sheet.write_string(0, 1, "Note")?;
    sheet.write_string(1, 0, "T-100")?;
    sheet.write_string(1, 1, "hello")?;
    sheet.write_number(3, 0, 4711.0)?;
    let bytes = workbook.save_to_buffer()?;

    let shown = preview(&WorkbookSheetReader::new(), &bytes)?;
    let report = importer(&service)
        .bulk_create(&WorkbookSheetReader::new(), &bytes, ImportPolicy::default())
        .await?;

    ensure!(shown.headers == ["Number", "Note"], "headers differ");
    ensure!(report.skipped_blank_rows == 1, "blank row 3 not skipped");
    ensure!(stored_numbers(&service).await? == ["4711", "T-100"], "numbers differ");
    let first_id = *report.created.first().ok_or_else(|| eyre!("no ids"))?;
    ensure!(service.get(first_id).await?.comment() == Some("hello"), "note lost");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn best_effort_duplicate_stores_first_row(service: TestService) -> eyre::Result<()> {
    let report = importer(&service)
        .bulk_create(&CsvSheetReader::new(), DUPLICATED, ImportPolicy::BestEffort)
        .await?;

    ensure!(report.created.len() == 1, "first row should be stored");
    let failure = report
        .failures
        .first()
        .ok_or_else(|| eyre!("second row should fail"))?;
    ensure!(failure.row == 3, "wrong failing row");
    ensure!(
        failure.kind == RowFailureKind::DuplicateTaskNumber,
        "wrong failure kind"
    );
    ensure!(stored_numbers(&service).await? == ["T-1"], "unexpected store contents");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn import_conflicting_with_store_reports_row(service: TestService) -> eyre::Result<()> {
    create_numbers(&service, &["T-2"]).await?;
    let input = b"number\nT-1\nT-2\nT-3\n";

    let result = importer(&service)
        .bulk_create(&CsvSheetReader::new(), input, ImportPolicy::AllOrNothing)
        .await;

    let Err(ImportError::ImportFailure { row, .. }) = result else {
        return Err(eyre!("expected an import failure, got {result:?}"));
    };
    ensure!(row == 3, "expected row 3, got {row}");
    ensure!(stored_numbers(&service).await? == ["T-2"], "store changed");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tsv_import_uses_tab_delimiter(service: TestService) -> eyre::Result<()> {
    let reader = AutoSheetReader::for_path("orders.tsv", b',')?;

    let report = importer(&service)
        .bulk_create(&reader, b"number\tcomment\nT-9\tsplit, not here\n", ImportPolicy::default())
        .await?;

    let id = *report.created.first().ok_or_else(|| eyre!("no ids"))?;
    ensure!(
        service.get(id).await?.comment() == Some("split, not here"),
        "comment should keep commas"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn preview_matches_import_input_without_storing(service: TestService) -> eyre::Result<()> {
    let input = b"number,,comment\nT-1,x\n";

    let shown = preview(&CsvSheetReader::new(), input)?;

    ensure!(shown.headers == ["number", "col2", "comment"], "headers differ");
    let item = shown.items.first().ok_or_else(|| eyre!("no items"))?;
    ensure!(item.get("col2").map(String::as_str) == Some("x"), "placeholder key");
    ensure!(item.get("comment").map(String::as_str) == Some(""), "missing cell");
    ensure!(service.repository().count().await? == 0, "preview stored tasks");
    Ok(())
}
