//! Task synchronization with GitHub issues.
//!
//! Creating or updating a task persists it locally and, when the task is
//! linked to a GitHub repository, opens or edits the matching issue and
//! records a local mirror of it. Both halves run in one transaction: a
//! failed GitHub call leaves no trace of the local change. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
