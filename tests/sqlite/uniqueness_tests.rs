//! `SQLite` tests for task number uniqueness and atomic batches.

use super::helpers::{SqliteContext, context};
use eyre::ensure;
use mockable::DefaultClock;
use rstest::rstest;
use warehouse_dispatch::task::{
    domain::{NewTask, TaskNumber},
    ports::{TaskRepository, TaskRepositoryError},
    services::{CreateTaskRequest, TaskLifecycleError},
};

fn draft(number: &str) -> eyre::Result<NewTask> {
    Ok(NewTask::new(TaskNumber::new(number)?, &DefaultClock))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_number_maps_to_domain_error(
    #[future] context: eyre::Result<SqliteContext>,
) -> eyre::Result<()> {
    let ctx = context.await?;
    ctx.service.create(CreateTaskRequest::new("U-1")).await?;

    let result = ctx.service.create(CreateTaskRequest::new("U-1")).await;

    ensure!(
        matches!(
            &result,
            Err(TaskLifecycleError::Repository(TaskRepositoryError::DuplicateTaskNumber(number)))
                if number.as_str() == "U-1"
        ),
        "expected DuplicateTaskNumber, got {result:?}"
    );
    ensure!(ctx.repository.count().await? == 1, "count changed");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn batch_is_stored_in_order(
    #[future] context: eyre::Result<SqliteContext>,
) -> eyre::Result<()> {
    let ctx = context.await?;
    let batch = vec![draft("B-1")?, draft("B-2")?, draft("B-3")?];

    let stored = ctx.repository.insert_all(&batch).await?;

    let numbers: Vec<&str> = stored.iter().map(|t| t.task_number().as_str()).collect();
    ensure!(numbers == ["B-1", "B-2", "B-3"], "order lost: {numbers:?}");
    ensure!(
        stored.windows(2).all(|pair| match pair {
            [left, right] => left.id() < right.id(),
            _ => true,
        }),
        "ids should follow input order"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn batch_with_internal_duplicate_rolls_back(
    #[future] context: eyre::Result<SqliteContext>,
) -> eyre::Result<()> {
    let ctx = context.await?;
    let batch = vec![draft("B-1")?, draft("B-2")?, draft("B-1")?];

    let result = ctx.repository.insert_all(&batch).await;

    let Err(TaskRepositoryError::BatchRowRejected { index, source }) = &result else {
        return Err(eyre::eyre!("expected BatchRowRejected, got {result:?}"));
    };
    ensure!(*index == 2, "wrong batch position {index}");
    ensure!(
        matches!(**source, TaskRepositoryError::DuplicateTaskNumber(_)),
        "wrong cause {source:?}"
    );
    ensure!(ctx.repository.count().await? == 0, "batch was not rolled back");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn batch_conflicting_with_store_rolls_back(
    #[future] context: eyre::Result<SqliteContext>,
) -> eyre::Result<()> {
    let ctx = context.await?;
    ctx.repository.insert(&draft("B-2")?).await?;

    let result = ctx
        .repository
        .insert_all(&[draft("B-1")?, draft("B-2")?])
        .await;

    ensure!(
        matches!(result, Err(TaskRepositoryError::BatchRowRejected { index: 1, .. })),
        "expected rejection at position 1, got {result:?}"
    );
    ensure!(ctx.repository.count().await? == 1, "partial batch was kept");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_batch_is_a_no_op(
    #[future] context: eyre::Result<SqliteContext>,
) -> eyre::Result<()> {
    let ctx = context.await?;

    let stored = ctx.repository.insert_all(&[]).await?;

    ensure!(stored.is_empty(), "nothing should be returned");
    ensure!(ctx.repository.count().await? == 0, "nothing should be stored");
    Ok(())
}
