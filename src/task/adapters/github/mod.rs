//! GitHub REST adapter for the issue tracker port.

mod client;

pub use client::GithubIssueClient;
