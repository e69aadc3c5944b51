//! Port contracts for task persistence and remote issue mirroring.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod issue_tracker;
pub mod repository;

pub use issue_tracker::{IssueTracker, IssueTrackerError, IssueTrackerResult};
pub use repository::{
    TaskReader, TaskRepositoryError, TaskRepositoryResult, TaskStore, TaskTransaction,
};
