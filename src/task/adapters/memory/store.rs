//! Transactional in-memory task store.
//!
//! A transaction holds the store's async mutex from `begin` until it is
//! committed, rolled back, or dropped, and works on a private copy of the
//! state. Commit writes the copy back; anything else discards it.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::task::{
    domain::{
        GithubIssue, GithubIssueId, GithubRepo, GithubRepoId, Task, TaskId, TaskSyncContext,
        User, UserId,
    },
    ports::{TaskReader, TaskRepositoryError, TaskRepositoryResult, TaskStore, TaskTransaction},
};

/// Thread-safe in-memory task store with serialised transactions.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    state: Arc<Mutex<StoreState>>,
}

#[derive(Debug, Clone, Default)]
struct StoreState {
    tasks: HashMap<TaskId, Task>,
    github_repos: HashMap<GithubRepoId, GithubRepo>,
    github_issues: HashMap<GithubIssueId, GithubIssue>,
    users: HashMap<UserId, User>,
}

impl InMemoryTaskStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a task outside any transaction, replacing an existing one.
    pub async fn insert_task(&self, task: Task) {
        self.state.lock().await.tasks.insert(task.id(), task);
    }

    /// Registers a GitHub repository.
    pub async fn insert_github_repo(&self, repo: GithubRepo) {
        self.state.lock().await.github_repos.insert(repo.id(), repo);
    }

    /// Registers a user.
    pub async fn insert_user(&self, user: User) {
        self.state.lock().await.users.insert(user.id(), user);
    }

    /// Returns every committed task.
    pub async fn tasks(&self) -> Vec<Task> {
        self.state.lock().await.tasks.values().cloned().collect()
    }

    /// Returns every committed issue mirror.
    pub async fn github_issues(&self) -> Vec<GithubIssue> {
        self.state
            .lock()
            .await
            .github_issues
            .values()
            .cloned()
            .collect()
    }

    /// Finds a committed issue mirror by local identifier.
    pub async fn find_github_issue_by_id(&self, id: GithubIssueId) -> Option<GithubIssue> {
        self.state.lock().await.github_issues.get(&id).cloned()
    }
}

#[async_trait]
impl TaskReader for InMemoryTaskStore {
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        Ok(self.state.lock().await.tasks.get(&id).cloned())
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    type Transaction = InMemoryTaskTransaction;

    async fn begin(&self) -> TaskRepositoryResult<Self::Transaction> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let working = guard.clone();
        Ok(InMemoryTaskTransaction { guard, working })
    }
}

/// Open transaction on an [`InMemoryTaskStore`].
#[derive(Debug)]
pub struct InMemoryTaskTransaction {
    guard: OwnedMutexGuard<StoreState>,
    working: StoreState,
}

#[async_trait]
impl TaskTransaction for InMemoryTaskTransaction {
    async fn insert_task(&mut self, task: &Task) -> TaskRepositoryResult<()> {
        if self.working.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        self.working.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn lock_task(&mut self, task_id: TaskId) -> TaskRepositoryResult<Task> {
        self.working
            .tasks
            .get(&task_id)
            .cloned()
            .ok_or(TaskRepositoryError::NotFound(task_id))
    }

    async fn update_task(&mut self, task: &Task) -> TaskRepositoryResult<()> {
        let slot = self
            .working
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        *slot = task.clone();
        Ok(())
    }

    async fn load_sync_context(&mut self, task_id: TaskId) -> TaskRepositoryResult<TaskSyncContext> {
        let state = &self.working;
        let task = state
            .tasks
            .get(&task_id)
            .cloned()
            .ok_or(TaskRepositoryError::NotFound(task_id))?;
        let github_repo = task
            .github_repo_id()
            .and_then(|repo_id| state.github_repos.get(&repo_id))
            .cloned()
            .ok_or(TaskRepositoryError::MissingGithubRepo(task_id))?;
        let github_issue = task
            .github_issue_id()
            .and_then(|issue_id| state.github_issues.get(&issue_id))
            .cloned();
        let user = state
            .users
            .get(&task.user_id())
            .cloned()
            .ok_or(TaskRepositoryError::MissingUser(task.user_id()))?;

        Ok(TaskSyncContext {
            task,
            github_repo,
            github_issue,
            user,
        })
    }

    async fn find_github_issue(
        &mut self,
        github_repo_id: GithubRepoId,
        github_id: u64,
    ) -> TaskRepositoryResult<Option<GithubIssue>> {
        Ok(self
            .working
            .github_issues
            .values()
            .find(|issue| issue.github_repo_id() == github_repo_id && issue.github_id() == github_id)
            .cloned())
    }

    async fn save_github_issue(&mut self, issue: &GithubIssue) -> TaskRepositoryResult<()> {
        self.working.github_issues.insert(issue.id(), issue.clone());
        Ok(())
    }

    async fn commit(self) -> TaskRepositoryResult<()> {
        let Self { mut guard, working } = self;
        *guard = working;
        Ok(())
    }

    async fn rollback(self) -> TaskRepositoryResult<()> {
        Ok(())
    }
}
