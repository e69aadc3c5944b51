//! Transactional unit of work over a [`TaskStore`].

use crate::task::ports::{TaskRepositoryError, TaskStore, TaskTransaction};
use futures::future::BoxFuture;
use tracing::error;

/// Runs `work` inside a fresh transaction.
///
/// The transaction commits when `work` succeeds and rolls back when it
/// fails, so either every write made through the transaction becomes
/// visible or none does. A failed rollback is logged and the original
/// error is returned.
///
/// # Errors
///
/// Returns the error produced by `work`, or a [`TaskRepositoryError`]
/// converted into `E` when the transaction cannot be opened or committed.
pub async fn run_in_transaction<S, T, E, F>(store: &S, work: F) -> Result<T, E>
where
    S: TaskStore,
    T: Send,
    E: From<TaskRepositoryError> + Send,
    F: for<'tx> FnOnce(&'tx mut S::Transaction) -> BoxFuture<'tx, Result<T, E>> + Send,
{
    let mut transaction = store.begin().await?;
    match work(&mut transaction).await {
        Ok(value) => {
            transaction.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = transaction.rollback().await {
                error!(error = %rollback_err, "transaction rollback failed");
            }
            Err(err)
        }
    }
}
