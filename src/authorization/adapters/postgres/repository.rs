//! `PostgreSQL` implementation of [`MembershipRepository`].

use super::schema::project_users;
use crate::authorization::{
    domain::{ProjectMembership, ProjectRole},
    ports::{MembershipRepository, MembershipRepositoryError, MembershipRepositoryResult},
};
use crate::task::{
    adapters::postgres::TaskPgPool,
    domain::{ProjectId, UserId},
};
use async_trait::async_trait;
use diesel::prelude::*;

/// `PostgreSQL`-backed membership repository.
#[derive(Debug, Clone)]
pub struct PostgresMembershipRepository {
    pool: TaskPgPool,
}

impl PostgresMembershipRepository {
    /// Creates a repository from a connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MembershipRepository for PostgresMembershipRepository {
    async fn find_membership(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> MembershipRepositoryResult<Option<ProjectMembership>> {
        let pool = self.pool.clone();
        let stored_role = tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(MembershipRepositoryError::persistence)?;
            project_users::table
                .find((project_id.into_inner(), user_id.into_inner()))
                .select(project_users::role)
                .first::<String>(&mut connection)
                .optional()
                .map_err(MembershipRepositoryError::persistence)
        })
        .await
        .map_err(MembershipRepositoryError::persistence)??;

        stored_role
            .map(|raw| {
                let role = ProjectRole::try_from(raw.as_str())
                    .map_err(|err| MembershipRepositoryError::InvalidRole(err.0))?;
                Ok(ProjectMembership::new(project_id, user_id, role))
            })
            .transpose()
    }
}
