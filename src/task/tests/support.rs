//! Shared fixtures for task tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use mockable::DefaultClock;
use mockall::mock;

use crate::task::{
    adapters::memory::InMemoryTaskStore,
    domain::{
        AccessToken, GithubRepo, IssuePayload, IssueState, ProjectId, RepositoryFullName,
        TaskAttributes, TaskSyncContext, User, UserId,
    },
    ports::{IssueTracker, IssueTrackerResult},
    services::TaskSyncService,
};

mock! {
    pub Tracker {}

    #[async_trait]
    impl IssueTracker for Tracker {
        async fn create_issue(&self, context: &TaskSyncContext) -> IssueTrackerResult<IssuePayload>;
        async fn update_issue(&self, context: &TaskSyncContext) -> IssueTrackerResult<IssuePayload>;
    }
}

pub(super) type TestService = TaskSyncService<InMemoryTaskStore, MockTracker, DefaultClock>;

/// A store seeded with one user and one connected repository.
pub(super) struct World {
    pub store: Arc<InMemoryTaskStore>,
    pub project_id: ProjectId,
    pub user: User,
    pub repo: GithubRepo,
}

impl World {
    pub async fn seeded() -> Self {
        let world = Self::unseeded();
        world.store.insert_user(world.user.clone()).await;
        world.store.insert_github_repo(world.repo.clone()).await;
        world
    }

    /// Repository and user exist as values but not in the store.
    pub fn unseeded() -> Self {
        let project_id = ProjectId::new();
        let repo = GithubRepo::new(
            project_id,
            4242,
            RepositoryFullName::new("acme/widgets").expect("valid repository name"),
        )
        .with_installation_token(AccessToken::new("install-token"));

        Self {
            store: Arc::new(InMemoryTaskStore::new()),
            project_id,
            user: User::new(UserId::new(), "octocat"),
            repo,
        }
    }

    pub fn local_attributes(&self, title: &str) -> TaskAttributes {
        TaskAttributes::new()
            .with_title(title)
            .with_project(self.project_id)
            .with_user(self.user.id())
    }

    pub fn linked_attributes(&self, title: &str) -> TaskAttributes {
        self.local_attributes(title).with_github_repo(self.repo.id())
    }

    pub fn service(&self, tracker: MockTracker) -> TestService {
        TaskSyncService::new(
            Arc::clone(&self.store),
            Arc::new(tracker),
            Arc::new(DefaultClock),
        )
    }
}

pub(super) fn payload(github_id: u64, number: u64, title: &str, state: IssueState) -> IssuePayload {
    let now = Utc::now();
    IssuePayload {
        id: github_id,
        number,
        title: title.to_owned(),
        body: None,
        state,
        html_url: format!("https://github.com/acme/widgets/issues/{number}"),
        locked: false,
        created_at: now,
        updated_at: now,
    }
}
