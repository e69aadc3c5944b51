//! Shared world state for task-skill authorization scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use rstest::fixture;
use taskbridge::{
    authorization::{adapters::memory::InMemoryMembershipRepository, policy::TaskSkillPolicy},
    task::{
        adapters::memory::InMemoryTaskStore,
        domain::{ProjectId, Task, UserId},
    },
};

/// Policy type used by the BDD world.
pub type TestPolicy = TaskSkillPolicy<InMemoryTaskStore, InMemoryMembershipRepository>;

/// Scenario world for authorization behaviour tests.
pub struct AuthorizationWorld {
    pub tasks: Arc<InMemoryTaskStore>,
    pub memberships: Arc<InMemoryMembershipRepository>,
    pub project_id: ProjectId,
    pub users: HashMap<String, UserId>,
    pub task: Option<Task>,
    pub decision: Option<bool>,
}

impl AuthorizationWorld {
    /// Creates a world for a single empty project.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tasks: Arc::new(InMemoryTaskStore::new()),
            memberships: Arc::new(InMemoryMembershipRepository::new()),
            project_id: ProjectId::new(),
            users: HashMap::new(),
            task: None,
            decision: None,
        }
    }

    /// Returns the id for `name`, allocating one on first use.
    pub fn user(&mut self, name: &str) -> UserId {
        *self.users.entry(name.to_owned()).or_insert_with(UserId::new)
    }

    pub fn policy(&self) -> TestPolicy {
        TaskSkillPolicy::new(Arc::clone(&self.tasks), Arc::clone(&self.memberships))
    }
}

impl Default for AuthorizationWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> AuthorizationWorld {
    AuthorizationWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
