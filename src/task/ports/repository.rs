//! Repository ports for transactional task persistence.

use crate::task::domain::{GithubIssue, GithubRepoId, Task, TaskId, TaskSyncContext, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Read-only task lookup.
#[async_trait]
pub trait TaskReader: Send + Sync {
    /// Finds a task by internal task identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;
}

/// Task storage able to open units of work.
#[async_trait]
pub trait TaskStore: TaskReader {
    /// Transaction handle produced by [`TaskStore::begin`].
    type Transaction: TaskTransaction;

    /// Opens a new transaction.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the backend cannot
    /// start a transaction.
    async fn begin(&self) -> TaskRepositoryResult<Self::Transaction>;
}

/// Operations available inside an open transaction.
///
/// Nothing written through a transaction is visible to other readers until
/// [`TaskTransaction::commit`] succeeds. Dropping a transaction without
/// committing discards its writes.
#[async_trait]
pub trait TaskTransaction: Send {
    /// Inserts a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the identifier is
    /// already taken.
    async fn insert_task(&mut self, task: &Task) -> TaskRepositoryResult<()>;

    /// Loads a task for modification.
    ///
    /// Backends that share storage lock the row until the transaction ends.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn lock_task(&mut self, task_id: TaskId) -> TaskRepositoryResult<Task>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update_task(&mut self, task: &Task) -> TaskRepositoryResult<()>;

    /// Loads a task together with its repository, issue mirror, and author.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`],
    /// [`TaskRepositoryError::MissingGithubRepo`], or
    /// [`TaskRepositoryError::MissingUser`] when an association cannot be
    /// resolved.
    async fn load_sync_context(&mut self, task_id: TaskId) -> TaskRepositoryResult<TaskSyncContext>;

    /// Finds an issue mirror by repository and global GitHub issue id.
    async fn find_github_issue(
        &mut self,
        github_repo_id: GithubRepoId,
        github_id: u64,
    ) -> TaskRepositoryResult<Option<GithubIssue>>;

    /// Inserts or replaces an issue mirror.
    async fn save_github_issue(&mut self, issue: &GithubIssue) -> TaskRepositoryResult<()>;

    /// Makes every write in this transaction durable.
    async fn commit(self) -> TaskRepositoryResult<()>;

    /// Discards every write in this transaction.
    async fn rollback(self) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The task's GitHub repository link could not be resolved.
    #[error("task {0} has no resolvable GitHub repository")]
    MissingGithubRepo(TaskId),

    /// The task's author could not be resolved.
    #[error("user not found: {0}")]
    MissingUser(UserId),

    /// A stored issue mirror could not be decoded.
    #[error("invalid stored issue: {0}")]
    InvalidIssue(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
