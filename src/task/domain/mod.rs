//! Domain model for tasks and their GitHub issue mirrors.
//!
//! Everything here is free of infrastructure: validation, the task
//! aggregate, and the GitHub records it links to.

mod attributes;
mod context;
mod error;
mod github;
mod ids;
mod task;
mod user;

pub use attributes::{
    MAX_TITLE_LENGTH, TaskAttributes, TaskChanges, TaskDraft, ValidatedTaskChanges,
};
pub use context::TaskSyncContext;
pub use error::{
    FieldError, FieldErrorKind, InvalidIssueNumber, ParseIssueStateError, ParseTaskStatusError,
    TaskValidationError,
};
pub use github::{
    AccessToken, GithubIssue, GithubRepo, IssuePayload, IssueState, PersistedGithubIssueData,
};
pub(crate) use ids::uuid_identifier;
pub use ids::{
    GithubIssueId, GithubRepoId, IssueNumber, ProjectId, RepositoryFullName, TaskId, UserId,
};
pub use task::{PersistedTaskData, Task, TaskStatus};
pub use user::User;
