//! Shared helpers for in-memory integration tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use mockable::DefaultClock;
use taskbridge::task::{
    adapters::memory::InMemoryTaskStore,
    domain::{
        AccessToken, GithubRepo, IssuePayload, IssueState, ProjectId, RepositoryFullName,
        TaskAttributes, TaskId, TaskSyncContext, User, UserId,
    },
    ports::{IssueTracker, IssueTrackerError, IssueTrackerResult},
    services::TaskSyncService,
};

/// Tracker calls recorded by [`ScriptedTracker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerCall {
    Create(TaskId),
    Update(TaskId),
}

/// Issue tracker replaying queued responses in order.
///
/// An exhausted queue answers with a 500 status.
#[derive(Debug, Default)]
pub struct ScriptedTracker {
    responses: Mutex<VecDeque<IssueTrackerResult<IssuePayload>>>,
    calls: Mutex<Vec<TrackerCall>>,
}

impl ScriptedTracker {
    pub fn respond_with(&self, response: IssueTrackerResult<IssuePayload>) {
        self.responses
            .lock()
            .expect("responses lock")
            .push_back(response);
    }

    pub fn calls(&self) -> Vec<TrackerCall> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn next(&self, call: TrackerCall) -> IssueTrackerResult<IssuePayload> {
        self.calls.lock().expect("calls lock").push(call);
        self.responses
            .lock()
            .expect("responses lock")
            .pop_front()
            .unwrap_or_else(|| {
                Err(IssueTrackerError::Status {
                    status: 500,
                    message: "no scripted response".to_owned(),
                })
            })
    }
}

#[async_trait]
impl IssueTracker for ScriptedTracker {
    async fn create_issue(&self, context: &TaskSyncContext) -> IssueTrackerResult<IssuePayload> {
        self.next(TrackerCall::Create(context.task.id()))
    }

    async fn update_issue(&self, context: &TaskSyncContext) -> IssueTrackerResult<IssuePayload> {
        self.next(TrackerCall::Update(context.task.id()))
    }
}

pub type TestService = TaskSyncService<InMemoryTaskStore, ScriptedTracker, DefaultClock>;

/// A project with one author and one connected repository.
pub struct Harness {
    pub store: Arc<InMemoryTaskStore>,
    pub tracker: Arc<ScriptedTracker>,
    pub service: TestService,
    pub project_id: ProjectId,
    pub author: User,
    pub repo: GithubRepo,
}

impl Harness {
    pub async fn new() -> Self {
        let store = Arc::new(InMemoryTaskStore::new());
        let tracker = Arc::new(ScriptedTracker::default());
        let project_id = ProjectId::new();
        let author = User::new(UserId::new(), "octocat").with_github_token(AccessToken::new("t"));
        let repo = GithubRepo::new(
            project_id,
            1_296_269,
            RepositoryFullName::new("octocat/Hello-World").expect("valid repository name"),
        );
        store.insert_user(author.clone()).await;
        store.insert_github_repo(repo.clone()).await;

        let service = TaskSyncService::new(
            Arc::clone(&store),
            Arc::clone(&tracker),
            Arc::new(DefaultClock),
        );
        Self {
            store,
            tracker,
            service,
            project_id,
            author,
            repo,
        }
    }

    pub fn attributes(&self, title: &str) -> TaskAttributes {
        TaskAttributes::new()
            .with_title(title)
            .with_project(self.project_id)
            .with_user(self.author.id())
    }

    pub fn linked(&self, title: &str) -> TaskAttributes {
        self.attributes(title).with_github_repo(self.repo.id())
    }
}

pub fn issue(github_id: u64, number: u64, title: &str, state: IssueState) -> IssuePayload {
    let now = Utc::now();
    IssuePayload {
        id: github_id,
        number,
        title: title.to_owned(),
        body: None,
        state,
        html_url: format!("https://github.com/octocat/Hello-World/issues/{number}"),
        locked: false,
        created_at: now,
        updated_at: now,
    }
}
