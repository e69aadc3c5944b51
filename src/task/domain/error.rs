//! Error types for task domain validation and parsing.

use std::fmt;
use thiserror::Error;

/// Reason a single task field was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// The field is mandatory and was not supplied.
    Required,
    /// The field was supplied but is empty after trimming.
    Blank,
    /// The field exceeds its storage limit.
    TooLong {
        /// Maximum accepted length in characters.
        max: usize,
    },
    /// The status value is not one of the supported task statuses.
    InvalidStatus(String),
    /// The value does not match the expected format.
    InvalidFormat(String),
}

impl fmt::Display for FieldErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "is required"),
            Self::Blank => write!(f, "can't be blank"),
            Self::TooLong { max } => write!(f, "should be at most {max} characters"),
            Self::InvalidStatus(value) => write!(f, "has unsupported status '{value}'"),
            Self::InvalidFormat(value) => write!(f, "has invalid format '{value}'"),
        }
    }
}

/// Field-level diagnostic produced by task validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Name of the rejected attribute.
    pub field: &'static str,
    /// Why the attribute was rejected.
    pub kind: FieldErrorKind,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.kind)
    }
}

/// Rejected task attributes together with every field diagnostic.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("task validation failed: {}", render_errors(.errors))]
pub struct TaskValidationError {
    errors: Vec<FieldError>,
}

impl TaskValidationError {
    /// Builds an error from collected field diagnostics.
    #[must_use]
    pub const fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    /// Builds an error carrying a single field diagnostic.
    #[must_use]
    pub fn single(field: &'static str, kind: FieldErrorKind) -> Self {
        Self::new(vec![FieldError { field, kind }])
    }

    /// Returns all field diagnostics.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Returns the diagnostics reported for `field`.
    pub fn errors_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldErrorKind> {
        self.errors
            .iter()
            .filter(move |error| error.field == field)
            .map(|error| &error.kind)
    }
}

fn render_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Error returned when a remote issue number cannot be stored.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("invalid issue number {0}, expected a positive integer")]
pub struct InvalidIssueNumber(pub u64);

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing GitHub issue states.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown issue state: {0}")]
pub struct ParseIssueStateError(pub String);
