//! Scoped transactions.

use crate::DatabasePool;
use roster_core::{BoxFuture, RosterResult};
use sqlx::Any;
use tracing::{debug, warn};

/// A transaction on a pooled connection. Dropping it without commit rolls back.
pub type Tx = sqlx::Transaction<'static, Any>;

/// Runs `op` inside a transaction.
///
/// Commits when `op` returns `Ok`, rolls back when it returns `Err`. A failed
/// rollback is logged and the original error is returned. The connection goes
/// back to the pool on every path.
///
/// ```ignore
/// let user = in_transaction(&pool, move |tx| {
///     Box::pin(async move { repository.insert(tx, &new_user).await })
/// })
/// .await?;
/// ```
pub async fn in_transaction<T, F>(pool: &DatabasePool, op: F) -> RosterResult<T>
where
    T: Send,
    F: for<'c> FnOnce(&'c mut Tx) -> BoxFuture<'c, T> + Send,
{
    let mut tx = pool.begin().await?;

    match op(&mut tx).await {
        Ok(value) => {
            tx.commit().await?;
            debug!("Transaction committed");
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!(error = %rollback_err, "Failed to roll back transaction");
            } else {
                debug!(error = %err, "Transaction rolled back");
            }
            Err(err)
        }
    }
}
