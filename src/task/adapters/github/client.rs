//! Reqwest-backed [`IssueTracker`] talking to the GitHub issues API.

use crate::config::GithubApiConfig;
use crate::task::{
    domain::{AccessToken, IssueNumber, IssuePayload, RepositoryFullName, TaskSyncContext},
    ports::{IssueTracker, IssueTrackerError, IssueTrackerResult},
};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, InvalidHeaderValue};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

const BODY_PREVIEW_LIMIT: usize = 512;
const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";
const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";

/// GitHub issues client.
///
/// Requests authenticate as the task author when they have linked a GitHub
/// account, and fall back to the repository's installation token otherwise.
#[derive(Debug, Clone)]
pub struct GithubIssueClient {
    http: reqwest::Client,
    api_url: String,
}

impl GithubIssueClient {
    /// Builds a client from API settings.
    ///
    /// # Errors
    ///
    /// Returns [`IssueTrackerError::Transport`] when the configured headers
    /// are invalid or the HTTP client cannot be constructed.
    pub fn new(config: &GithubApiConfig) -> IssueTrackerResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .default_headers(default_headers(&config.api_version).map_err(IssueTrackerError::transport)?)
            .build()
            .map_err(IssueTrackerError::transport)?;

        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_owned(),
        })
    }

    fn issues_url(&self, repo: &RepositoryFullName) -> String {
        format!("{}/repos/{}/{}/issues", self.api_url, repo.owner(), repo.name())
    }

    fn issue_url(&self, repo: &RepositoryFullName, number: IssueNumber) -> String {
        format!("{}/{number}", self.issues_url(repo))
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        url: &str,
    ) -> IssueTrackerResult<IssuePayload> {
        let response = request.send().await.map_err(IssueTrackerError::transport)?;
        let status = response.status();
        let body = response.text().await.map_err(IssueTrackerError::transport)?;
        debug!(url, status = status.as_u16(), "GitHub responded");

        if !status.is_success() {
            return Err(IssueTrackerError::Status {
                status: status.as_u16(),
                message: preview_body(&body),
            });
        }

        serde_json::from_str::<IssuePayload>(&body).map_err(IssueTrackerError::decode)
    }
}

#[async_trait]
impl IssueTracker for GithubIssueClient {
    async fn create_issue(&self, context: &TaskSyncContext) -> IssueTrackerResult<IssuePayload> {
        let token = resolve_token(context)?;
        let url = self.issues_url(context.github_repo.full_name());
        debug!(task_id = %context.task.id(), url = %url, "creating GitHub issue");

        let request = self
            .http
            .post(&url)
            .bearer_auth(token.expose())
            .json(&IssueRequest::for_create(context));
        self.send(request, &url).await
    }

    async fn update_issue(&self, context: &TaskSyncContext) -> IssueTrackerResult<IssuePayload> {
        let issue = context
            .github_issue
            .as_ref()
            .ok_or(IssueTrackerError::MissingIssue(context.task.id()))?;
        let token = resolve_token(context)?;
        let url = self.issue_url(context.github_repo.full_name(), issue.number());
        debug!(task_id = %context.task.id(), url = %url, "updating GitHub issue");

        let request = self
            .http
            .patch(&url)
            .bearer_auth(token.expose())
            .json(&IssueRequest::for_update(context));
        self.send(request, &url).await
    }
}

/// JSON body for issue create and edit calls.
#[derive(Debug, Serialize, PartialEq, Eq)]
struct IssueRequest<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<&'static str>,
}

impl<'a> IssueRequest<'a> {
    fn for_create(context: &'a TaskSyncContext) -> Self {
        Self {
            title: context.task.title(),
            body: context.task.markdown(),
            state: None,
        }
    }

    fn for_update(context: &'a TaskSyncContext) -> Self {
        Self {
            title: context.task.title(),
            body: context.task.markdown(),
            state: Some(context.task.status().as_str()),
        }
    }
}

/// Picks the author's token, then the installation token.
fn resolve_token(context: &TaskSyncContext) -> IssueTrackerResult<&AccessToken> {
    context
        .user
        .github_token()
        .or_else(|| context.github_repo.installation_token())
        .ok_or(IssueTrackerError::MissingCredentials(context.github_repo.id()))
}

fn default_headers(api_version: &str) -> Result<HeaderMap, InvalidHeaderValue> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_MEDIA_TYPE));
    headers.insert(API_VERSION_HEADER, HeaderValue::from_str(api_version)?);
    Ok(headers)
}

fn preview_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_owned();
    }

    let mut preview: String = trimmed.chars().take(BODY_PREVIEW_LIMIT).collect();
    if trimmed.chars().count() > BODY_PREVIEW_LIMIT {
        preview.push_str("...");
    }
    preview
}
