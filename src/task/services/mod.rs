//! Application services for task synchronization.

mod linker;
mod sync;
mod unit_of_work;

pub use linker::{GithubIssueLinker, IssueLinkError};
pub use sync::{TaskSyncError, TaskSyncResult, TaskSyncService};
pub use unit_of_work::run_in_transaction;
