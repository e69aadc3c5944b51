//! Sync service atomicity against `PostgreSQL`.

use std::sync::Arc;

use super::helpers::{BoxError, PgContext, StubTracker, issue, pg_context};
use mockable::DefaultClock;
use rstest::rstest;
use taskbridge::task::{
    adapters::postgres::PostgresTaskStore,
    domain::{IssueState, TaskChanges},
    ports::TaskReader,
    services::{TaskSyncError, TaskSyncService},
};

fn service(
    ctx: &PgContext,
    tracker: StubTracker,
) -> TaskSyncService<PostgresTaskStore, StubTracker, DefaultClock> {
    TaskSyncService::new(
        Arc::clone(&ctx.store),
        Arc::new(tracker),
        Arc::new(DefaultClock),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn linked_create_stores_task_and_issue(
    #[future] pg_context: Result<PgContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = pg_context.await?;
    let tracker = StubTracker::succeeding(issue(77, 5, "Mirror me", IssueState::Open));

    let created = service(&ctx, tracker).create(ctx.linked("Mirror me")).await?;

    let stored = ctx
        .store
        .find_by_id(created.id())
        .await?
        .ok_or("created task should be stored")?;
    assert!(stored.github_issue_id().is_some());
    assert_eq!(stored.github_issue_id(), created.github_issue_id());
    assert_eq!(ctx.count("github_issues").await?, 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_is_rolled_back_when_the_tracker_fails(
    #[future] pg_context: Result<PgContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = pg_context.await?;

    let result = service(&ctx, StubTracker::failing())
        .create(ctx.linked("Never stored"))
        .await;

    assert!(matches!(result, Err(TaskSyncError::ExternalSync)));
    assert_eq!(ctx.count("tasks").await?, 0);
    assert_eq!(ctx.count("github_issues").await?, 0);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_update_keeps_the_previous_row(
    #[future] pg_context: Result<PgContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = pg_context.await?;
    let tracker = StubTracker::succeeding(issue(78, 6, "Stable", IssueState::Open));
    let created = service(&ctx, tracker).create(ctx.linked("Stable")).await?;

    let result = service(&ctx, StubTracker::failing())
        .update(
            &created,
            TaskChanges::new()
                .with_title("Unstable")
                .with_status("closed"),
        )
        .await;

    assert!(matches!(result, Err(TaskSyncError::ExternalSync)));
    let stored = ctx
        .store
        .find_by_id(created.id())
        .await?
        .ok_or("task should survive the failed update")?;
    assert_eq!(stored.title(), "Stable");
    assert_eq!(stored.status(), created.status());
    assert_eq!(stored.github_issue_id(), created.github_issue_id());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn updates_from_one_snapshot_do_not_revert_each_other(
    #[future] pg_context: Result<PgContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = pg_context.await?;
    let tracker = StubTracker::failing();
    let sync = service(&ctx, tracker);
    let snapshot = sync.create(ctx.attributes("Original")).await?;

    sync.update(&snapshot, TaskChanges::new().with_title("Renamed"))
        .await?;
    sync.update(&snapshot, TaskChanges::new().with_archived(true))
        .await?;

    let stored = ctx
        .store
        .find_by_id(snapshot.id())
        .await?
        .ok_or("task should be stored")?;
    assert_eq!(stored.title(), "Renamed");
    assert!(stored.archived());
    Ok(())
}
