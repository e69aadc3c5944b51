//! Preloaded data needed to mirror a task to GitHub.

use super::{GithubIssue, GithubRepo, Task, User};

/// A task together with its repository, issue mirror, and author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSyncContext {
    /// The task being mirrored.
    pub task: Task,
    /// Repository the task mirrors to.
    pub github_repo: GithubRepo,
    /// Existing issue mirror, if the task was synced before.
    pub github_issue: Option<GithubIssue>,
    /// Author of the task.
    pub user: User,
}
