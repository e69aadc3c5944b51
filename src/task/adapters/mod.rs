//! Adapters implementing the task ports.
//!
//! - [`memory::InMemoryTaskStore`]: transactional in-memory storage for tests
//! - [`postgres::PostgresTaskStore`]: Diesel-backed `PostgreSQL` storage
//! - [`github::GithubIssueClient`]: GitHub REST issue tracker

pub mod github;
pub mod memory;
pub mod postgres;
