//! Create and update changesets for tasks.
//!
//! Attributes arrive loosely typed from callers; validation collects every
//! field error before any persistence happens so callers can render all of
//! them at once.

use super::{
    FieldError, FieldErrorKind, GithubRepoId, ProjectId, TaskStatus, TaskValidationError, UserId,
};
use serde::Deserialize;

/// Maximum task title length, matching `VARCHAR(255)`.
pub const MAX_TITLE_LENGTH: usize = 255;

/// Attributes supplied when creating a task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TaskAttributes {
    title: Option<String>,
    markdown: Option<String>,
    status: Option<String>,
    archived: Option<bool>,
    project_id: Option<ProjectId>,
    user_id: Option<UserId>,
    github_repo_id: Option<GithubRepoId>,
}

impl TaskAttributes {
    /// Creates an empty attribute set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the task title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the task markdown body.
    #[must_use]
    pub fn with_markdown(mut self, markdown: impl Into<String>) -> Self {
        self.markdown = Some(markdown.into());
        self
    }

    /// Sets the raw task status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the archived flag.
    #[must_use]
    pub const fn with_archived(mut self, archived: bool) -> Self {
        self.archived = Some(archived);
        self
    }

    /// Sets the owning project.
    #[must_use]
    pub const fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Sets the authoring user.
    #[must_use]
    pub const fn with_user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Links the task to a GitHub repository.
    #[must_use]
    pub const fn with_github_repo(mut self, github_repo_id: GithubRepoId) -> Self {
        self.github_repo_id = Some(github_repo_id);
        self
    }

    /// Validates the attributes into a [`TaskDraft`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError`] listing every rejected field.
    pub fn validate(self) -> Result<TaskDraft, TaskValidationError> {
        let mut errors = Vec::new();

        let title = match self.title {
            Some(raw) => validate_title(&raw, &mut errors),
            None => {
                errors.push(required("title"));
                None
            }
        };
        let status = self
            .status
            .map_or(Some(TaskStatus::Open), |raw| validate_status(&raw, &mut errors));
        let project_id = self.project_id.or_else(|| {
            errors.push(required("project_id"));
            None
        });
        let user_id = self.user_id.or_else(|| {
            errors.push(required("user_id"));
            None
        });

        match (title, status, project_id, user_id) {
            (Some(title), Some(status), Some(project_id), Some(user_id)) if errors.is_empty() => {
                Ok(TaskDraft {
                    title,
                    markdown: self.markdown.and_then(normalize_optional),
                    status,
                    archived: self.archived.unwrap_or(false),
                    project_id,
                    user_id,
                    github_repo_id: self.github_repo_id,
                })
            }
            _ => Err(TaskValidationError::new(errors)),
        }
    }
}

/// Validated attributes ready to become a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub(crate) title: String,
    pub(crate) markdown: Option<String>,
    pub(crate) status: TaskStatus,
    pub(crate) archived: bool,
    pub(crate) project_id: ProjectId,
    pub(crate) user_id: UserId,
    pub(crate) github_repo_id: Option<GithubRepoId>,
}

/// Attributes supplied when updating an existing task.
///
/// Ownership and repository linkage are fixed at creation and cannot be
/// changed through this changeset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TaskChanges {
    title: Option<String>,
    markdown: Option<String>,
    status: Option<String>,
    archived: Option<bool>,
}

impl TaskChanges {
    /// Creates an empty changeset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Changes the task title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Changes the markdown body. An empty string clears it.
    #[must_use]
    pub fn with_markdown(mut self, markdown: impl Into<String>) -> Self {
        self.markdown = Some(markdown.into());
        self
    }

    /// Changes the raw task status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Changes the archived flag.
    #[must_use]
    pub const fn with_archived(mut self, archived: bool) -> Self {
        self.archived = Some(archived);
        self
    }

    /// Validates the changeset.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError`] listing every rejected field.
    pub fn validate(self) -> Result<ValidatedTaskChanges, TaskValidationError> {
        let mut errors = Vec::new();
        let title = self
            .title
            .and_then(|raw| validate_title(&raw, &mut errors));
        let status = self
            .status
            .and_then(|raw| validate_status(&raw, &mut errors));

        if !errors.is_empty() {
            return Err(TaskValidationError::new(errors));
        }

        Ok(ValidatedTaskChanges {
            title,
            markdown: self.markdown.map(normalize_optional),
            status,
            archived: self.archived,
        })
    }
}

/// A changeset whose every present field has passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedTaskChanges {
    pub(crate) title: Option<String>,
    pub(crate) markdown: Option<Option<String>>,
    pub(crate) status: Option<TaskStatus>,
    pub(crate) archived: Option<bool>,
}

fn required(field: &'static str) -> FieldError {
    FieldError {
        field,
        kind: FieldErrorKind::Required,
    }
}

fn validate_title(raw: &str, errors: &mut Vec<FieldError>) -> Option<String> {
    let normalized = raw.trim();
    if normalized.is_empty() {
        errors.push(FieldError {
            field: "title",
            kind: FieldErrorKind::Blank,
        });
        return None;
    }
    if normalized.chars().count() > MAX_TITLE_LENGTH {
        errors.push(FieldError {
            field: "title",
            kind: FieldErrorKind::TooLong {
                max: MAX_TITLE_LENGTH,
            },
        });
        return None;
    }
    Some(normalized.to_owned())
}

fn validate_status(raw: &str, errors: &mut Vec<FieldError>) -> Option<TaskStatus> {
    TaskStatus::try_from(raw)
        .map_err(|_| {
            errors.push(FieldError {
                field: "status",
                kind: FieldErrorKind::InvalidStatus(raw.to_owned()),
            });
        })
        .ok()
}

fn normalize_optional(value: String) -> Option<String> {
    let normalized = value.trim();
    (!normalized.is_empty()).then(|| normalized.to_owned())
}
