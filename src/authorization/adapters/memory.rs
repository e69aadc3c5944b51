//! In-memory membership repository for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::authorization::{
    domain::ProjectMembership,
    ports::{MembershipRepository, MembershipRepositoryError, MembershipRepositoryResult},
};
use crate::task::domain::{ProjectId, UserId};

/// Thread-safe in-memory membership repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMembershipRepository {
    memberships: Arc<RwLock<HashMap<(ProjectId, UserId), ProjectMembership>>>,
}

impl InMemoryMembershipRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a membership.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipRepositoryError::Persistence`] if the lock is
    /// poisoned.
    pub fn insert(&self, membership: ProjectMembership) -> MembershipRepositoryResult<()> {
        let mut memberships = self.memberships.write().map_err(|err| {
            MembershipRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        memberships.insert((membership.project_id(), membership.user_id()), membership);
        Ok(())
    }
}

#[async_trait]
impl MembershipRepository for InMemoryMembershipRepository {
    async fn find_membership(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> MembershipRepositoryResult<Option<ProjectMembership>> {
        let memberships = self.memberships.read().map_err(|err| {
            MembershipRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(memberships.get(&(project_id, user_id)).cloned())
    }
}
