//! Conversions between Diesel rows and task domain types.

use super::models::{GithubIssueRow, GithubRepoRow, TaskRow, UserRow};
use crate::task::{
    domain::{
        AccessToken, GithubIssue, GithubIssueId, GithubRepo, GithubRepoId, IssueNumber,
        IssueState, PersistedGithubIssueData, PersistedTaskData, ProjectId, RepositoryFullName,
        Task, TaskId, TaskStatus, User, UserId,
    },
    ports::{TaskRepositoryError, TaskRepositoryResult},
};

/// Converts a GitHub id to its `BIGINT` column value.
pub(super) fn to_db_github_id(value: u64) -> TaskRepositoryResult<i64> {
    i64::try_from(value).map_err(TaskRepositoryError::persistence)
}

fn from_db_github_id(value: i64) -> TaskRepositoryResult<u64> {
    u64::try_from(value).map_err(TaskRepositoryError::persistence)
}

pub(super) fn task_to_row(task: &Task) -> TaskRow {
    TaskRow {
        id: task.id().into_inner(),
        project_id: task.project_id().into_inner(),
        user_id: task.user_id().into_inner(),
        title: task.title().to_owned(),
        markdown: task.markdown().map(str::to_owned),
        status: task.status().as_str().to_owned(),
        archived: task.archived(),
        github_repo_id: task.github_repo_id().map(GithubRepoId::into_inner),
        github_issue_id: task.github_issue_id().map(GithubIssueId::into_inner),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

pub(super) fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let status =
        TaskStatus::try_from(row.status.as_str()).map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        project_id: ProjectId::from_uuid(row.project_id),
        user_id: UserId::from_uuid(row.user_id),
        title: row.title,
        markdown: row.markdown,
        status,
        archived: row.archived,
        github_repo_id: row.github_repo_id.map(GithubRepoId::from_uuid),
        github_issue_id: row.github_issue_id.map(GithubIssueId::from_uuid),
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

pub(super) fn row_to_github_repo(row: GithubRepoRow) -> TaskRepositoryResult<GithubRepo> {
    let full_name =
        RepositoryFullName::new(row.full_name).map_err(TaskRepositoryError::persistence)?;

    Ok(GithubRepo::from_persisted(
        GithubRepoId::from_uuid(row.id),
        ProjectId::from_uuid(row.project_id),
        from_db_github_id(row.github_id)?,
        full_name,
        row.installation_token.map(AccessToken::new),
    ))
}

pub(super) fn github_issue_to_row(issue: &GithubIssue) -> TaskRepositoryResult<GithubIssueRow> {
    Ok(GithubIssueRow {
        id: issue.id().into_inner(),
        github_repo_id: issue.github_repo_id().into_inner(),
        github_id: to_db_github_id(issue.github_id())?,
        number: to_db_github_id(issue.number().value())?,
        title: issue.title().to_owned(),
        body: issue.body().map(str::to_owned),
        state: issue.state().as_str().to_owned(),
        html_url: issue.html_url().to_owned(),
        locked: issue.locked(),
        github_created_at: issue.github_created_at(),
        github_updated_at: issue.github_updated_at(),
        inserted_at: issue.inserted_at(),
        updated_at: issue.updated_at(),
    })
}

pub(super) fn row_to_github_issue(row: GithubIssueRow) -> TaskRepositoryResult<GithubIssue> {
    let number = u64::try_from(row.number)
        .ok()
        .and_then(|value| IssueNumber::new(value).ok())
        .ok_or_else(|| {
            TaskRepositoryError::InvalidIssue(format!(
                "issue {} has invalid number {}",
                row.id, row.number
            ))
        })?;
    let state = IssueState::try_from(row.state.as_str())
        .map_err(|err| TaskRepositoryError::InvalidIssue(err.to_string()))?;

    Ok(GithubIssue::from_persisted(PersistedGithubIssueData {
        id: GithubIssueId::from_uuid(row.id),
        github_repo_id: GithubRepoId::from_uuid(row.github_repo_id),
        github_id: from_db_github_id(row.github_id)?,
        number,
        title: row.title,
        body: row.body,
        state,
        html_url: row.html_url,
        locked: row.locked,
        github_created_at: row.github_created_at,
        github_updated_at: row.github_updated_at,
        inserted_at: row.inserted_at,
        updated_at: row.updated_at,
    }))
}

pub(super) fn row_to_user(row: UserRow) -> User {
    let user = User::new(UserId::from_uuid(row.id), row.username);
    if let Some(token) = row.github_token {
        return user.with_github_token(AccessToken::new(token));
    }
    user
}
