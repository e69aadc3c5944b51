//! Project membership lookup port.

use crate::authorization::domain::ProjectMembership;
use crate::task::domain::{ProjectId, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for membership lookups.
pub type MembershipRepositoryResult<T> = Result<T, MembershipRepositoryError>;

/// Read access to project memberships.
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Finds the membership of `user_id` in `project_id`.
    ///
    /// Returns `None` when the user is not a member.
    async fn find_membership(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> MembershipRepositoryResult<Option<ProjectMembership>>;
}

/// Errors returned by membership repositories.
#[derive(Debug, Clone, Error)]
pub enum MembershipRepositoryError {
    /// A stored role could not be decoded.
    #[error("invalid stored role: {0}")]
    InvalidRole(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl MembershipRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
