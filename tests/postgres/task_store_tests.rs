//! Transaction behaviour of the `PostgreSQL` task store.

use super::helpers::{BoxError, PgContext, pg_context};
use mockable::DefaultClock;
use rstest::rstest;
use taskbridge::task::{
    domain::{Task, TaskChanges},
    ports::{TaskReader, TaskRepositoryError, TaskStore, TaskTransaction},
};

fn new_task(ctx: &PgContext, title: &str) -> Result<Task, BoxError> {
    Ok(Task::new(ctx.attributes(title).validate()?, &DefaultClock))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn writes_become_visible_only_after_commit(
    #[future] pg_context: Result<PgContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = pg_context.await?;
    let task = new_task(&ctx, "Committed")?;

    let mut tx = ctx.store.begin().await?;
    tx.insert_task(&task).await?;
    assert!(ctx.store.find_by_id(task.id()).await?.is_none());

    tx.commit().await?;
    let stored = ctx
        .store
        .find_by_id(task.id())
        .await?
        .ok_or("committed task should be readable")?;
    assert_eq!(stored.title(), "Committed");
    assert_eq!(stored.user_id(), ctx.author.id());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rollback_discards_writes(
    #[future] pg_context: Result<PgContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = pg_context.await?;
    let task = new_task(&ctx, "Rolled back")?;

    let mut tx = ctx.store.begin().await?;
    tx.insert_task(&task).await?;
    tx.rollback().await?;

    assert!(ctx.store.find_by_id(task.id()).await?.is_none());
    assert_eq!(ctx.count("tasks").await?, 0);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dropped_transactions_discard_writes_and_free_their_connection(
    #[future] pg_context: Result<PgContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = pg_context.await?;

    // More abandoned transactions than the pool has connections.
    for attempt in 0..3 {
        let mut abandoned = ctx.store.begin().await?;
        abandoned
            .insert_task(&new_task(&ctx, &format!("Abandoned {attempt}"))?)
            .await?;
        drop(abandoned);
    }
    assert_eq!(ctx.count("tasks").await?, 0);

    let kept = new_task(&ctx, "Kept")?;
    let mut kept_tx = ctx.store.begin().await?;
    kept_tx.insert_task(&kept).await?;
    kept_tx.commit().await?;
    assert_eq!(ctx.count("tasks").await?, 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_and_missing_tasks_are_reported(
    #[future] pg_context: Result<PgContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = pg_context.await?;
    let task = new_task(&ctx, "Once")?;
    let ghost = new_task(&ctx, "Ghost")?;

    let mut seeding = ctx.store.begin().await?;
    seeding.insert_task(&task).await?;
    seeding.commit().await?;

    let mut conflicting = ctx.store.begin().await?;
    let duplicate = conflicting.insert_task(&task).await;
    assert!(matches!(duplicate, Err(TaskRepositoryError::DuplicateTask(id)) if id == task.id()));
    conflicting.rollback().await?;

    let mut reading = ctx.store.begin().await?;
    let missing = reading.lock_task(ghost.id()).await;
    assert!(matches!(missing, Err(TaskRepositoryError::NotFound(id)) if id == ghost.id()));
    let not_updated = reading.update_task(&ghost).await;
    assert!(matches!(not_updated, Err(TaskRepositoryError::NotFound(id)) if id == ghost.id()));
    reading.rollback().await?;
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn locked_tasks_reflect_committed_changes(
    #[future] pg_context: Result<PgContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = pg_context.await?;
    let snapshot = new_task(&ctx, "Before")?;
    let mut seeding = ctx.store.begin().await?;
    seeding.insert_task(&snapshot).await?;
    seeding.commit().await?;

    let mut renaming = ctx.store.begin().await?;
    let mut renamed = renaming.lock_task(snapshot.id()).await?;
    renamed.apply_changes(TaskChanges::new().with_title("After").validate()?, &DefaultClock);
    renaming.update_task(&renamed).await?;
    renaming.commit().await?;

    let mut reading = ctx.store.begin().await?;
    let locked = reading.lock_task(snapshot.id()).await?;
    reading.rollback().await?;
    assert_eq!(locked.title(), "After");
    Ok(())
}
