//! GitHub repository links, issue mirrors, and the issue payload received
//! from the GitHub REST API.

use super::{
    GithubIssueId, GithubRepoId, InvalidIssueNumber, IssueNumber, ParseIssueStateError, ProjectId,
    RepositoryFullName,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Credential used to authenticate against the GitHub API.
///
/// The `Debug` output is redacted so tokens never reach logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a raw token value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw token for use in an `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(**redacted**)")
    }
}

/// Local configuration linking a project to a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubRepo {
    id: GithubRepoId,
    project_id: ProjectId,
    github_id: u64,
    full_name: RepositoryFullName,
    installation_token: Option<AccessToken>,
}

impl GithubRepo {
    /// Creates a repository link without installation credentials.
    #[must_use]
    pub fn new(project_id: ProjectId, github_id: u64, full_name: RepositoryFullName) -> Self {
        Self {
            id: GithubRepoId::new(),
            project_id,
            github_id,
            full_name,
            installation_token: None,
        }
    }

    /// Reconstructs a repository link from storage.
    #[must_use]
    pub const fn from_persisted(
        id: GithubRepoId,
        project_id: ProjectId,
        github_id: u64,
        full_name: RepositoryFullName,
        installation_token: Option<AccessToken>,
    ) -> Self {
        Self {
            id,
            project_id,
            github_id,
            full_name,
            installation_token,
        }
    }

    /// Attaches the GitHub App installation token.
    #[must_use]
    pub fn with_installation_token(mut self, token: AccessToken) -> Self {
        self.installation_token = Some(token);
        self
    }

    /// Returns the local identifier.
    #[must_use]
    pub const fn id(&self) -> GithubRepoId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the numeric GitHub repository id.
    #[must_use]
    pub const fn github_id(&self) -> u64 {
        self.github_id
    }

    /// Returns the `owner/repo` name.
    #[must_use]
    pub const fn full_name(&self) -> &RepositoryFullName {
        &self.full_name
    }

    /// Returns the installation token, if configured.
    #[must_use]
    pub const fn installation_token(&self) -> Option<&AccessToken> {
        self.installation_token.as_ref()
    }
}

/// Open or closed state of a GitHub issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueState {
    /// The issue is open.
    Open,
    /// The issue is closed.
    Closed,
}

impl IssueState {
    /// Returns the canonical storage and API representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

impl TryFrom<&str> for IssueState {
    type Error = ParseIssueStateError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            _ => Err(ParseIssueStateError(value.to_owned())),
        }
    }
}

/// Issue representation returned by the GitHub REST API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuePayload {
    /// Global GitHub issue id.
    pub id: u64,
    /// Repository-scoped issue number.
    pub number: u64,
    /// Issue title.
    pub title: String,
    /// Issue body.
    #[serde(default)]
    pub body: Option<String>,
    /// Issue state.
    pub state: IssueState,
    /// Browser URL of the issue.
    pub html_url: String,
    /// Whether conversation on the issue is locked.
    #[serde(default)]
    pub locked: bool,
    /// Remote creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Remote update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Local mirror of a GitHub issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubIssue {
    id: GithubIssueId,
    github_repo_id: GithubRepoId,
    github_id: u64,
    number: IssueNumber,
    title: String,
    body: Option<String>,
    state: IssueState,
    html_url: String,
    locked: bool,
    github_created_at: DateTime<Utc>,
    github_updated_at: DateTime<Utc>,
    inserted_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted issue mirror.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedGithubIssueData {
    /// Local identifier.
    pub id: GithubIssueId,
    /// Repository the issue belongs to.
    pub github_repo_id: GithubRepoId,
    /// Global GitHub issue id.
    pub github_id: u64,
    /// Repository-scoped issue number.
    pub number: IssueNumber,
    /// Issue title.
    pub title: String,
    /// Issue body.
    pub body: Option<String>,
    /// Issue state.
    pub state: IssueState,
    /// Browser URL of the issue.
    pub html_url: String,
    /// Whether conversation on the issue is locked.
    pub locked: bool,
    /// Remote creation timestamp.
    pub github_created_at: DateTime<Utc>,
    /// Remote update timestamp.
    pub github_updated_at: DateTime<Utc>,
    /// Local insertion timestamp.
    pub inserted_at: DateTime<Utc>,
    /// Local update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl GithubIssue {
    /// Builds a new mirror record from an API payload.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidIssueNumber`] when the payload carries an issue
    /// number that cannot be stored.
    pub fn from_payload(
        github_repo_id: GithubRepoId,
        payload: &IssuePayload,
        clock: &impl Clock,
    ) -> Result<Self, InvalidIssueNumber> {
        let timestamp = clock.utc();
        Ok(Self {
            id: GithubIssueId::new(),
            github_repo_id,
            github_id: payload.id,
            number: IssueNumber::new(payload.number)?,
            title: payload.title.clone(),
            body: payload.body.clone(),
            state: payload.state,
            html_url: payload.html_url.clone(),
            locked: payload.locked,
            github_created_at: payload.created_at,
            github_updated_at: payload.updated_at,
            inserted_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs an issue mirror from storage.
    #[must_use]
    pub fn from_persisted(data: PersistedGithubIssueData) -> Self {
        Self {
            id: data.id,
            github_repo_id: data.github_repo_id,
            github_id: data.github_id,
            number: data.number,
            title: data.title,
            body: data.body,
            state: data.state,
            html_url: data.html_url,
            locked: data.locked,
            github_created_at: data.github_created_at,
            github_updated_at: data.github_updated_at,
            inserted_at: data.inserted_at,
            updated_at: data.updated_at,
        }
    }

    /// Overwrites mirrored fields with a fresher payload.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidIssueNumber`] when the payload carries an issue
    /// number that cannot be stored. The record is left untouched.
    pub fn refresh_from_payload(
        &mut self,
        payload: &IssuePayload,
        clock: &impl Clock,
    ) -> Result<(), InvalidIssueNumber> {
        self.number = IssueNumber::new(payload.number)?;
        self.title.clone_from(&payload.title);
        self.body.clone_from(&payload.body);
        self.state = payload.state;
        self.html_url.clone_from(&payload.html_url);
        self.locked = payload.locked;
        self.github_created_at = payload.created_at;
        self.github_updated_at = payload.updated_at;
        self.updated_at = clock.utc();
        Ok(())
    }

    /// Returns the local identifier.
    #[must_use]
    pub const fn id(&self) -> GithubIssueId {
        self.id
    }

    /// Returns the repository the issue belongs to.
    #[must_use]
    pub const fn github_repo_id(&self) -> GithubRepoId {
        self.github_repo_id
    }

    /// Returns the global GitHub issue id.
    #[must_use]
    pub const fn github_id(&self) -> u64 {
        self.github_id
    }

    /// Returns the repository-scoped issue number.
    #[must_use]
    pub const fn number(&self) -> IssueNumber {
        self.number
    }

    /// Returns the issue title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the issue body.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Returns the issue state.
    #[must_use]
    pub const fn state(&self) -> IssueState {
        self.state
    }

    /// Returns the browser URL.
    #[must_use]
    pub fn html_url(&self) -> &str {
        &self.html_url
    }

    /// Returns whether the conversation is locked.
    #[must_use]
    pub const fn locked(&self) -> bool {
        self.locked
    }

    /// Returns the remote creation timestamp.
    #[must_use]
    pub const fn github_created_at(&self) -> DateTime<Utc> {
        self.github_created_at
    }

    /// Returns the remote update timestamp.
    #[must_use]
    pub const fn github_updated_at(&self) -> DateTime<Utc> {
        self.github_updated_at
    }

    /// Returns the local insertion timestamp.
    #[must_use]
    pub const fn inserted_at(&self) -> DateTime<Utc> {
        self.inserted_at
    }

    /// Returns the local update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
