//! Issue tracker port used to mirror tasks remotely.

use crate::task::domain::{GithubRepoId, IssuePayload, TaskId, TaskSyncContext};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for issue tracker operations.
pub type IssueTrackerResult<T> = Result<T, IssueTrackerError>;

/// Remote issue tracker contract.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Opens a new remote issue for the task in `context`.
    async fn create_issue(&self, context: &TaskSyncContext) -> IssueTrackerResult<IssuePayload>;

    /// Pushes the task's current fields to its existing remote issue.
    async fn update_issue(&self, context: &TaskSyncContext) -> IssueTrackerResult<IssuePayload>;
}

/// Errors returned by issue tracker adapters.
#[derive(Debug, Clone, Error)]
pub enum IssueTrackerError {
    /// Neither the author nor the repository installation has a token.
    #[error("no GitHub credentials available for repository {0}")]
    MissingCredentials(GithubRepoId),

    /// An update was requested for a task with no linked remote issue.
    #[error("task {0} has no linked GitHub issue")]
    MissingIssue(TaskId),

    /// The remote API answered with a non-success status.
    #[error("GitHub API returned status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Truncated response body.
        message: String,
    },

    /// The request could not be delivered.
    #[error("GitHub transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The response body could not be decoded.
    #[error("failed to decode GitHub response: {0}")]
    Decode(Arc<dyn std::error::Error + Send + Sync>),
}

impl IssueTrackerError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Wraps a decoding error.
    pub fn decode(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Decode(Arc::new(err))
    }
}
