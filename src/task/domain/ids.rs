//! Identifier and validated scalar types for the task domain.

use super::{FieldErrorKind, InvalidIssueNumber, TaskValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declares a UUID-backed identifier newtype.
macro_rules! uuid_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(::uuid::Uuid);

        impl $name {
            /// Creates a new random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(::uuid::Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: ::uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the wrapped UUID.
            #[must_use]
            pub const fn into_inner(self) -> ::uuid::Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl AsRef<::uuid::Uuid> for $name {
            fn as_ref(&self) -> &::uuid::Uuid {
                &self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

pub(crate) use uuid_identifier;

uuid_identifier!(
    /// Unique identifier for an internal task record.
    TaskId
);

uuid_identifier!(
    /// Identifier of the project that owns a task.
    ProjectId
);

uuid_identifier!(
    /// Identifier of a user account.
    UserId
);

uuid_identifier!(
    /// Identifier of a locally configured GitHub repository link.
    GithubRepoId
);

uuid_identifier!(
    /// Identifier of a local GitHub issue mirror record.
    GithubIssueId
);

/// Positive issue number assigned by GitHub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueNumber(u64);

impl IssueNumber {
    /// Largest issue number representable in the current `PostgreSQL` schema.
    const MAX_PERSISTED_VALUE: u64 = i64::MAX as u64;

    /// Creates a validated issue number.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidIssueNumber`] when the value is zero or exceeds the
    /// schema-backed maximum (`i64::MAX`).
    pub const fn new(value: u64) -> Result<Self, InvalidIssueNumber> {
        if value == 0 || value > Self::MAX_PERSISTED_VALUE {
            return Err(InvalidIssueNumber(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for IssueNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalized GitHub repository identifier in `owner/repo` format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepositoryFullName(String);

impl RepositoryFullName {
    /// Creates a validated repository name.
    ///
    /// # Errors
    ///
    /// Returns a [`TaskValidationError`] on the `full_name` field if the
    /// value does not contain exactly one slash-delimited owner and
    /// repository segment.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskValidationError> {
        let raw = value.into();
        let normalized = raw.trim();
        let mut segments = normalized.split('/');
        let owner = segments.next().unwrap_or_default();
        let repo = segments.next().unwrap_or_default();
        let has_more_segments = segments.next().is_some();
        let is_valid = !owner.is_empty()
            && !repo.is_empty()
            && !has_more_segments
            && !normalized.chars().any(char::is_whitespace);

        if !is_valid {
            return Err(TaskValidationError::single(
                "full_name",
                FieldErrorKind::InvalidFormat(raw),
            ));
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the repository owner segment.
    #[must_use]
    pub fn owner(&self) -> &str {
        self.0.split('/').next().unwrap_or_default()
    }

    /// Returns the repository name segment.
    #[must_use]
    pub fn name(&self) -> &str {
        self.0.split('/').nth(1).unwrap_or_default()
    }

    /// Returns the repository name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for RepositoryFullName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for RepositoryFullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
