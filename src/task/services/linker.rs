//! Creates or refreshes local GitHub issue mirrors from API payloads.

use crate::task::{
    domain::{GithubIssue, GithubRepo, InvalidIssueNumber, IssuePayload},
    ports::{TaskRepositoryError, TaskTransaction},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors raised while linking an issue payload to its local mirror.
#[derive(Debug, Clone, Error)]
pub enum IssueLinkError {
    /// The payload cannot be represented locally.
    #[error(transparent)]
    Payload(#[from] InvalidIssueNumber),
    /// Reading or writing the mirror failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Keeps one local [`GithubIssue`] per repository and remote issue id.
pub struct GithubIssueLinker<C>
where
    C: Clock + Send + Sync,
{
    clock: Arc<C>,
}

impl<C> Clone for GithubIssueLinker<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C> GithubIssueLinker<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a linker stamping records with `clock`.
    #[must_use]
    pub const fn new(clock: Arc<C>) -> Self {
        Self { clock }
    }

    /// Creates or refreshes the mirror for `payload` inside `transaction`.
    ///
    /// # Errors
    ///
    /// Returns [`IssueLinkError::Payload`] for payloads that cannot be
    /// stored and [`IssueLinkError::Repository`] when persistence fails.
    pub async fn link<Tx>(
        &self,
        transaction: &mut Tx,
        github_repo: &GithubRepo,
        payload: &IssuePayload,
    ) -> Result<GithubIssue, IssueLinkError>
    where
        Tx: TaskTransaction,
    {
        let existing = transaction
            .find_github_issue(github_repo.id(), payload.id)
            .await?;

        let issue = match existing {
            Some(mut issue) => {
                issue.refresh_from_payload(payload, &*self.clock)?;
                debug!(issue_id = %issue.id(), number = %issue.number(), "refreshed issue mirror");
                issue
            }
            None => {
                let issue = GithubIssue::from_payload(github_repo.id(), payload, &*self.clock)?;
                debug!(issue_id = %issue.id(), number = %issue.number(), "created issue mirror");
                issue
            }
        };

        transaction.save_github_issue(&issue).await?;
        Ok(issue)
    }
}
