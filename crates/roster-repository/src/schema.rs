//! Schema bootstrap for the `users` table.

use crate::DatabasePool;
use roster_core::{RosterError, RosterResult};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

/// Columns every repository query relies on.
const SHAPE_PROBE: &str = "SELECT id, email, password, name FROM users WHERE 1 = 0";

/// Creates the `users` table if it does not exist.
///
/// Each instance issues its DDL at most once; later calls return the first
/// outcome if it succeeded and retry if it failed.
pub struct SchemaInitializer {
    pool: Arc<DatabasePool>,
    initialized: OnceCell<()>,
}

impl SchemaInitializer {
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self {
            pool,
            initialized: OnceCell::new(),
        }
    }

    /// Ensures the `users` table exists with the expected columns.
    ///
    /// An existing table missing any of those columns is a configuration
    /// error.
    pub async fn initialize(&self) -> RosterResult<()> {
        self.initialized
            .get_or_try_init(|| self.create_schema())
            .await
            .map(|_| ())
    }

    /// Returns `true` once [`initialize`](Self::initialize) has succeeded.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized.initialized()
    }

    async fn create_schema(&self) -> RosterResult<()> {
        let dialect = self.pool.dialect();
        debug!(%dialect, "Ensuring users table exists");

        sqlx::query(dialect.create_users_table())
            .execute(self.pool.inner())
            .await?;

        sqlx::query(SHAPE_PROBE)
            .execute(self.pool.inner())
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db_err) => {
                    warn!("Existing users table is incompatible: {}", db_err);
                    RosterError::configuration(format!("Existing users table is incompatible: {}", db_err))
                }
                other => RosterError::from(other),
            })?;

        info!("Schema initialized");
        Ok(())
    }
}

impl std::fmt::Debug for SchemaInitializer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaInitializer")
            .field("initialized", &self.is_initialized())
            .finish_non_exhaustive()
    }
}
