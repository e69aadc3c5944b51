//! `PostgreSQL` task store with explicitly driven transactions.
//!
//! A [`PostgresTaskTransaction`] checks a connection out of the pool, opens a
//! database transaction on it, and keeps both until commit or rollback. Each
//! operation moves the connection onto the blocking pool and back. A
//! transaction dropped while still open returns a connection whose
//! transaction manager reports it as broken, so the pool discards it and the
//! server rolls the work back.

use super::{
    conversion::{
        github_issue_to_row, row_to_github_issue, row_to_github_repo, row_to_task, row_to_user,
        task_to_row, to_db_github_id,
    },
    models::{GithubIssueRow, GithubRepoRow, TaskRow, UserRow},
    schema::{github_issues, github_repos, tasks, users},
};
use crate::task::{
    domain::{GithubIssue, GithubRepoId, Task, TaskId, TaskSyncContext},
    ports::{TaskReader, TaskRepositoryError, TaskRepositoryResult, TaskStore, TaskTransaction},
};
use async_trait::async_trait;
use diesel::connection::{AnsiTransactionManager, TransactionManager};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

type PooledConn = PooledConnection<ConnectionManager<PgConnection>>;

/// The transaction's connection was lost to a failed blocking task.
#[derive(Debug, Error)]
#[error("transaction connection is no longer available")]
struct ConnectionUnavailable;

/// `PostgreSQL`-backed task store.
#[derive(Debug, Clone)]
pub struct PostgresTaskStore {
    pool: TaskPgPool,
}

impl PostgresTaskStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    /// Returns the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &TaskPgPool {
        &self.pool
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskReader for PostgresTaskStore {
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }
}

#[async_trait]
impl TaskStore for PostgresTaskStore {
    type Transaction = PostgresTaskTransaction;

    async fn begin(&self) -> TaskRepositoryResult<Self::Transaction> {
        let pool = self.pool.clone();
        let connection = tokio::task::spawn_blocking(move || {
            let mut pooled = pool.get().map_err(TaskRepositoryError::persistence)?;
            <AnsiTransactionManager as TransactionManager<PgConnection>>::begin_transaction(
                &mut pooled,
            )
            .map_err(TaskRepositoryError::persistence)?;
            Ok::<_, TaskRepositoryError>(pooled)
        })
        .await
        .map_err(TaskRepositoryError::persistence)??;

        Ok(PostgresTaskTransaction {
            connection: Some(connection),
        })
    }
}

/// Open transaction on a [`PostgresTaskStore`].
pub struct PostgresTaskTransaction {
    connection: Option<PooledConn>,
}

impl std::fmt::Debug for PostgresTaskTransaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresTaskTransaction")
            .field("open", &self.connection.is_some())
            .finish()
    }
}

impl PostgresTaskTransaction {
    async fn with_connection<F, T>(&mut self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let mut checked_out = self
            .connection
            .take()
            .ok_or_else(|| TaskRepositoryError::persistence(ConnectionUnavailable))?;
        let (returned, outcome) = tokio::task::spawn_blocking(move || {
            let outcome = f(&mut checked_out);
            (checked_out, outcome)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?;
        self.connection = Some(returned);
        outcome
    }
}

#[async_trait]
impl TaskTransaction for PostgresTaskTransaction {
    async fn insert_task(&mut self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = task_to_row(task);
        self.with_connection(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn lock_task(&mut self, task_id: TaskId) -> TaskRepositoryResult<Task> {
        self.with_connection(move |connection| lock_task_row(connection, task_id))
            .await
    }

    async fn update_task(&mut self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = task_to_row(task);
        self.with_connection(move |connection| {
            let updated = diesel::update(tasks::table.find(task_id.into_inner()))
                .set(&row)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if updated == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn load_sync_context(&mut self, task_id: TaskId) -> TaskRepositoryResult<TaskSyncContext> {
        self.with_connection(move |connection| load_context(connection, task_id))
            .await
    }

    async fn find_github_issue(
        &mut self,
        github_repo_id: GithubRepoId,
        github_id: u64,
    ) -> TaskRepositoryResult<Option<GithubIssue>> {
        let github_id = to_db_github_id(github_id)?;
        self.with_connection(move |connection| {
            let row = github_issues::table
                .filter(github_issues::github_repo_id.eq(github_repo_id.into_inner()))
                .filter(github_issues::github_id.eq(github_id))
                .select(GithubIssueRow::as_select())
                .first::<GithubIssueRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_github_issue).transpose()
        })
        .await
    }

    async fn save_github_issue(&mut self, issue: &GithubIssue) -> TaskRepositoryResult<()> {
        let row = github_issue_to_row(issue)?;
        self.with_connection(move |connection| {
            diesel::insert_into(github_issues::table)
                .values(&row)
                .on_conflict(github_issues::id)
                .do_update()
                .set(&row)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn commit(mut self) -> TaskRepositoryResult<()> {
        self.with_connection(|connection| {
            <AnsiTransactionManager as TransactionManager<PgConnection>>::commit_transaction(
                connection,
            )
            .map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn rollback(mut self) -> TaskRepositoryResult<()> {
        self.with_connection(|connection| {
            <AnsiTransactionManager as TransactionManager<PgConnection>>::rollback_transaction(
                connection,
            )
            .map_err(TaskRepositoryError::persistence)
        })
        .await
    }
}

/// Selects a task row with `FOR UPDATE`.
fn lock_task_row(connection: &mut PgConnection, task_id: TaskId) -> TaskRepositoryResult<Task> {
    let task_row = tasks::table
        .find(task_id.into_inner())
        .select(TaskRow::as_select())
        .for_update()
        .first::<TaskRow>(connection)
        .optional()
        .map_err(TaskRepositoryError::persistence)?
        .ok_or(TaskRepositoryError::NotFound(task_id))?;
    row_to_task(task_row)
}

/// Loads and locks a task row with its associations.
fn load_context(
    connection: &mut PgConnection,
    task_id: TaskId,
) -> TaskRepositoryResult<TaskSyncContext> {
    let task = lock_task_row(connection, task_id)?;

    let repo_id = task
        .github_repo_id()
        .ok_or(TaskRepositoryError::MissingGithubRepo(task_id))?;
    let github_repo = github_repos::table
        .find(repo_id.into_inner())
        .select(GithubRepoRow::as_select())
        .first::<GithubRepoRow>(connection)
        .optional()
        .map_err(TaskRepositoryError::persistence)?
        .ok_or(TaskRepositoryError::MissingGithubRepo(task_id))
        .and_then(row_to_github_repo)?;

    let github_issue = match task.github_issue_id() {
        Some(issue_id) => github_issues::table
            .find(issue_id.into_inner())
            .select(GithubIssueRow::as_select())
            .first::<GithubIssueRow>(connection)
            .optional()
            .map_err(TaskRepositoryError::persistence)?
            .map(row_to_github_issue)
            .transpose()?,
        None => None,
    };

    let user = users::table
        .find(task.user_id().into_inner())
        .select(UserRow::as_select())
        .first::<UserRow>(connection)
        .optional()
        .map_err(TaskRepositoryError::persistence)?
        .map(row_to_user)
        .ok_or(TaskRepositoryError::MissingUser(task.user_id()))?;

    Ok(TaskSyncContext {
        task,
        github_repo,
        github_issue,
        user,
    })
}
