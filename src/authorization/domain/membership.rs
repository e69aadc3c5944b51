//! Project membership and roles.

use crate::task::domain::{ProjectId, UserId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role of a user within a project, ordered by privilege.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ProjectRole {
    /// Invited but not yet accepted.
    Pending,
    /// May edit project content.
    Contributor,
    /// May manage members.
    Admin,
    /// Owns the project.
    Owner,
}

impl ProjectRole {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Contributor => "contributor",
            Self::Admin => "admin",
            Self::Owner => "owner",
        }
    }

    /// Returns `true` for contributors and every role above them.
    #[must_use]
    pub fn is_contributor_or_higher(self) -> bool {
        self >= Self::Contributor
    }
}

impl TryFrom<&str> for ProjectRole {
    type Error = ParseProjectRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "pending" => Ok(Self::Pending),
            "contributor" => Ok(Self::Contributor),
            "admin" => Ok(Self::Admin),
            "owner" => Ok(Self::Owner),
            other => Err(ParseProjectRoleError(other.to_owned())),
        }
    }
}

/// Error returned while parsing stored project roles.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown project role: {0}")]
pub struct ParseProjectRoleError(pub String);

/// A user's membership in a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectMembership {
    project_id: ProjectId,
    user_id: UserId,
    role: ProjectRole,
}

impl ProjectMembership {
    /// Creates a membership record.
    #[must_use]
    pub const fn new(project_id: ProjectId, user_id: UserId, role: ProjectRole) -> Self {
        Self {
            project_id,
            user_id,
            role,
        }
    }

    /// Returns the project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the member.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the member's role.
    #[must_use]
    pub const fn role(&self) -> ProjectRole {
        self.role
    }
}
