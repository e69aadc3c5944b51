//! Service layer for creating and updating tasks mirrored to GitHub.
//!
//! Each operation is a two-step pipeline inside one transaction: persist the
//! task locally, then mirror it to the issue tracker when the task is linked
//! to a repository. A failure in either step rolls back both.

use super::{GithubIssueLinker, IssueLinkError, run_in_transaction};
use crate::task::{
    domain::{Task, TaskAttributes, TaskChanges, TaskId, TaskValidationError},
    ports::{IssueTracker, IssueTrackerError, TaskRepositoryError, TaskStore, TaskTransaction},
};
use mockable::Clock;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, instrument};

/// Service-level errors for task synchronization.
#[derive(Debug, Error)]
pub enum TaskSyncError {
    /// The supplied attributes were rejected; nothing was persisted.
    #[error(transparent)]
    Validation(#[from] TaskValidationError),
    /// Mirroring to the issue tracker failed; the local change was rolled
    /// back. Details are logged, not returned.
    #[error("failed to synchronize task with GitHub")]
    ExternalSync,
    /// Local persistence failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task synchronization operations.
pub type TaskSyncResult<T> = Result<T, TaskSyncError>;

/// Failure of one remote-sync step, kept for logging.
#[derive(Debug, Error)]
enum SyncStepError {
    #[error("failed to load task context: {0}")]
    Load(#[source] TaskRepositoryError),
    #[error("issue tracker call failed: {0}")]
    Tracker(#[source] IssueTrackerError),
    #[error("failed to link issue payload: {0}")]
    Link(#[source] IssueLinkError),
    #[error("failed to store issue reference on task: {0}")]
    Relink(#[source] TaskRepositoryError),
}

#[derive(Debug, Clone, Copy)]
enum SyncOperation {
    Create,
    Update,
}

impl SyncOperation {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
        }
    }
}

impl fmt::Display for SyncOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task create/update orchestration with GitHub mirroring.
pub struct TaskSyncService<S, T, C>
where
    S: TaskStore,
    T: IssueTracker + 'static,
    C: Clock + Send + Sync + 'static,
{
    store: Arc<S>,
    pipeline: SyncPipeline<T, C>,
    clock: Arc<C>,
}

impl<S, T, C> TaskSyncService<S, T, C>
where
    S: TaskStore,
    T: IssueTracker + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a new task sync service.
    #[must_use]
    pub fn new(store: Arc<S>, tracker: Arc<T>, clock: Arc<C>) -> Self {
        let pipeline = SyncPipeline {
            tracker,
            linker: GithubIssueLinker::new(Arc::clone(&clock)),
            clock: Arc::clone(&clock),
        };
        Self {
            store,
            pipeline,
            clock,
        }
    }

    /// Validates and inserts a new task, then opens a GitHub issue for it
    /// when the task is linked to a repository.
    ///
    /// # Errors
    ///
    /// Returns [`TaskSyncError::Validation`] for rejected attributes,
    /// [`TaskSyncError::ExternalSync`] when mirroring fails, and
    /// [`TaskSyncError::Repository`] when local persistence fails. No task
    /// exists afterwards in any error case.
    #[instrument(skip_all)]
    pub async fn create(&self, attributes: TaskAttributes) -> TaskSyncResult<Task> {
        let task = Task::new(attributes.validate()?, &*self.clock);
        let pipeline = self.pipeline.clone();

        run_in_transaction(&*self.store, move |transaction| {
            Box::pin(async move {
                transaction.insert_task(&task).await?;
                pipeline.create_on_github(transaction, task).await
            })
        })
        .await
    }

    /// Applies `changes` to the stored copy of `task`, then pushes the
    /// result to the task's GitHub issue when the task is linked to a
    /// repository.
    ///
    /// Only `task`'s id is read. The stored row is locked for the rest of the
    /// transaction, so fields absent from `changes` keep their stored values
    /// even when `task` is an outdated snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`TaskSyncError::Validation`] for rejected changes,
    /// [`TaskSyncError::ExternalSync`] when mirroring fails, and
    /// [`TaskSyncError::Repository`] when local persistence fails. The
    /// stored task keeps its previous state in every error case.
    #[instrument(skip_all, fields(task_id = %task.id()))]
    pub async fn update(&self, task: &Task, changes: TaskChanges) -> TaskSyncResult<Task> {
        let validated = changes.validate()?;
        let task_id = task.id();
        let pipeline = self.pipeline.clone();
        let clock = Arc::clone(&self.clock);

        run_in_transaction(&*self.store, move |transaction| {
            Box::pin(async move {
                let mut updated = transaction.lock_task(task_id).await?;
                updated.apply_changes(validated, &*clock);
                transaction.update_task(&updated).await?;
                pipeline.update_on_github(transaction, updated).await
            })
        })
        .await
    }
}

/// Remote-sync step shared by create and update.
struct SyncPipeline<T, C>
where
    C: Clock + Send + Sync,
{
    tracker: Arc<T>,
    linker: GithubIssueLinker<C>,
    clock: Arc<C>,
}

impl<T, C> Clone for SyncPipeline<T, C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            tracker: Arc::clone(&self.tracker),
            linker: self.linker.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<T, C> SyncPipeline<T, C>
where
    T: IssueTracker,
    C: Clock + Send + Sync,
{
    async fn create_on_github<Tx>(&self, transaction: &mut Tx, task: Task) -> TaskSyncResult<Task>
    where
        Tx: TaskTransaction,
    {
        if !task.is_github_linked() {
            debug!(task_id = %task.id(), "task has no GitHub repository; stored locally");
            return Ok(task);
        }

        let task_id = task.id();
        let linked = self
            .open_issue(transaction, task_id)
            .await
            .map_err(|err| sync_failed(task_id, SyncOperation::Create, &err))?;
        info!(
            task_id = %task_id,
            github_issue_id = ?linked.github_issue_id(),
            "task mirrored to new GitHub issue"
        );
        Ok(linked)
    }

    async fn update_on_github<Tx>(&self, transaction: &mut Tx, task: Task) -> TaskSyncResult<Task>
    where
        Tx: TaskTransaction,
    {
        if !task.is_github_linked() {
            debug!(task_id = %task.id(), "task has no GitHub repository; stored locally");
            return Ok(task);
        }

        let task_id = task.id();
        self.push_issue(transaction, task_id)
            .await
            .map_err(|err| sync_failed(task_id, SyncOperation::Update, &err))?;
        info!(task_id = %task_id, "task changes pushed to GitHub issue");
        // The refreshed mirror is not re-applied to the task; its issue
        // reference was set when the issue was first created.
        Ok(task)
    }

    async fn open_issue<Tx>(&self, transaction: &mut Tx, task_id: TaskId) -> Result<Task, SyncStepError>
    where
        Tx: TaskTransaction,
    {
        let context = transaction
            .load_sync_context(task_id)
            .await
            .map_err(SyncStepError::Load)?;
        let payload = self
            .tracker
            .create_issue(&context)
            .await
            .map_err(SyncStepError::Tracker)?;
        let issue = self
            .linker
            .link(transaction, &context.github_repo, &payload)
            .await
            .map_err(SyncStepError::Link)?;

        let mut task = context.task;
        task.link_github_issue(issue.id(), &*self.clock);
        transaction
            .update_task(&task)
            .await
            .map_err(SyncStepError::Relink)?;
        Ok(task)
    }

    async fn push_issue<Tx>(&self, transaction: &mut Tx, task_id: TaskId) -> Result<(), SyncStepError>
    where
        Tx: TaskTransaction,
    {
        let context = transaction
            .load_sync_context(task_id)
            .await
            .map_err(SyncStepError::Load)?;
        let payload = self
            .tracker
            .update_issue(&context)
            .await
            .map_err(SyncStepError::Tracker)?;
        self.linker
            .link(transaction, &context.github_repo, &payload)
            .await
            .map_err(SyncStepError::Link)?;
        Ok(())
    }
}

/// Logs the full step failure and collapses it for the caller.
fn sync_failed(task_id: TaskId, operation: SyncOperation, err: &SyncStepError) -> TaskSyncError {
    error!(
        task_id = %task_id,
        operation = %operation,
        error = %err,
        "GitHub sync failed; rolling back task change"
    );
    TaskSyncError::ExternalSync
}
