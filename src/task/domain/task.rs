//! Task aggregate root and task status.

use super::{
    GithubIssueId, GithubRepoId, ParseTaskStatusError, ProjectId, TaskDraft, TaskId, UserId,
    ValidatedTaskChanges,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task status as shown on the project board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task is open for work.
    Open,
    /// Task has been closed.
    Closed,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    user_id: UserId,
    title: String,
    markdown: Option<String>,
    status: TaskStatus,
    archived: bool,
    github_repo_id: Option<GithubRepoId>,
    github_issue_id: Option<GithubIssueId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Authoring user.
    pub user_id: UserId,
    /// Task title.
    pub title: String,
    /// Markdown body, if any.
    pub markdown: Option<String>,
    /// Board status.
    pub status: TaskStatus,
    /// Whether the task is archived.
    pub archived: bool,
    /// Linked GitHub repository, if any.
    pub github_repo_id: Option<GithubRepoId>,
    /// Linked GitHub issue mirror, if any.
    pub github_issue_id: Option<GithubIssueId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task from validated attributes.
    #[must_use]
    pub fn new(draft: TaskDraft, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            project_id: draft.project_id,
            user_id: draft.user_id,
            title: draft.title,
            markdown: draft.markdown,
            status: draft.status,
            archived: draft.archived,
            github_repo_id: draft.github_repo_id,
            github_issue_id: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            user_id: data.user_id,
            title: data.title,
            markdown: data.markdown,
            status: data.status,
            archived: data.archived,
            github_repo_id: data.github_repo_id,
            github_issue_id: data.github_issue_id,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the authoring user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the markdown body, if any.
    #[must_use]
    pub fn markdown(&self) -> Option<&str> {
        self.markdown.as_deref()
    }

    /// Returns the board status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns whether the task is archived.
    #[must_use]
    pub const fn archived(&self) -> bool {
        self.archived
    }

    /// Returns the linked GitHub repository, if any.
    #[must_use]
    pub const fn github_repo_id(&self) -> Option<GithubRepoId> {
        self.github_repo_id
    }

    /// Returns the linked GitHub issue mirror, if any.
    #[must_use]
    pub const fn github_issue_id(&self) -> Option<GithubIssueId> {
        self.github_issue_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `true` when the task mirrors to a GitHub repository.
    #[must_use]
    pub const fn is_github_linked(&self) -> bool {
        self.github_repo_id.is_some()
    }

    /// Applies a validated changeset.
    pub fn apply_changes(&mut self, changes: ValidatedTaskChanges, clock: &impl Clock) {
        let ValidatedTaskChanges {
            title,
            markdown,
            status,
            archived,
        } = changes;

        if let Some(value) = title {
            self.title = value;
        }
        if let Some(value) = markdown {
            self.markdown = value;
        }
        if let Some(value) = status {
            self.status = value;
        }
        if let Some(value) = archived {
            self.archived = value;
        }
        self.touch(clock);
    }

    /// Points the task at its GitHub issue mirror.
    pub fn link_github_issue(&mut self, github_issue_id: GithubIssueId, clock: &impl Clock) {
        self.github_issue_id = Some(github_issue_id);
        self.touch(clock);
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
