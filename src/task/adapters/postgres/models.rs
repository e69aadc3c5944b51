//! Diesel row models for task synchronization persistence.

use super::schema::{github_issues, github_repos, tasks, users};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Task row used for reads, inserts, and full-row updates.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Authoring user.
    pub user_id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional markdown body.
    pub markdown: Option<String>,
    /// Task status.
    pub status: String,
    /// Archive flag.
    pub archived: bool,
    /// Linked GitHub repository.
    pub github_repo_id: Option<uuid::Uuid>,
    /// Linked GitHub issue mirror.
    pub github_issue_id: Option<uuid::Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// GitHub repository row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = github_repos)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct GithubRepoRow {
    /// Internal repository identifier.
    pub id: uuid::Uuid,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Global GitHub repository id.
    pub github_id: i64,
    /// `owner/repo` name.
    pub full_name: String,
    /// GitHub App installation token.
    pub installation_token: Option<String>,
}

/// GitHub issue mirror row used for reads and upserts.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = github_issues)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct GithubIssueRow {
    /// Internal issue identifier.
    pub id: uuid::Uuid,
    /// Repository the issue belongs to.
    pub github_repo_id: uuid::Uuid,
    /// Global GitHub issue id.
    pub github_id: i64,
    /// Repository-scoped issue number.
    pub number: i64,
    /// Issue title.
    pub title: String,
    /// Issue body.
    pub body: Option<String>,
    /// Issue state.
    pub state: String,
    /// Browser URL.
    pub html_url: String,
    /// Conversation lock flag.
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

/// User row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// Internal user identifier.
    pub id: uuid::Uuid,
    /// Login name.
    pub username: String,
    /// GitHub OAuth token.
    pub github_token: Option<String>,
}
