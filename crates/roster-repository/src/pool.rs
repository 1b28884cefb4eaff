//! Database connection pool management.

use crate::dialect::SqlDialect;
use crate::transaction::Tx;
use roster_config::DatabaseConfig;
use roster_core::{RosterError, RosterResult};
use sqlx::any::{AnyConnectOptions, AnyPoolOptions};
use sqlx::pool::PoolConnection;
use sqlx::{Any, AnyPool, ConnectOptions};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Database pool wrapper.
///
/// Owns every connection it hands out. Borrowed connections and transactions
/// return to the pool when their guard drops.
pub struct DatabasePool {
    pool: AnyPool,
    dialect: SqlDialect,
}

impl DatabasePool {
    /// Creates a new database pool from configuration.
    pub async fn new(config: &DatabaseConfig) -> RosterResult<Self> {
        sqlx::any::install_default_drivers();

        let url = config.connection_url()?;
        let dialect = SqlDialect::from_url(&url)?;
        if dialect == SqlDialect::Sqlite {
            debug!("SQLite ignores database.username and database.password");
        }

        let mut options = AnyConnectOptions::from_str(&url)
            .map_err(|e| RosterError::configuration(format!("Invalid database URL: {}", e)))?;
        if !config.log_queries {
            options = options.disable_statement_logging();
        }

        info!(%dialect, "Connecting to database...");

        let pool = AnyPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout())
            .idle_timeout(Some(config.idle_timeout()))
            .connect_with(options)
            .await
            .map_err(|e| {
                warn!("Failed to connect to database: {}", e);
                match e {
                    sqlx::Error::Configuration(_) => RosterError::configuration(format!("Failed to connect: {}", e)),
                    _ => RosterError::storage(format!("Failed to connect: {}", e)),
                }
            })?;

        info!(
            %dialect,
            max_connections = config.max_connections,
            "Database connection pool established"
        );
        Ok(Self { pool, dialect })
    }

    /// Returns a reference to the underlying pool.
    #[must_use]
    pub fn inner(&self) -> &AnyPool {
        &self.pool
    }

    /// Returns the SQL dialect of the connected store.
    #[must_use]
    pub const fn dialect(&self) -> SqlDialect {
        self.dialect
    }

    /// Borrows a connection, waiting at most the configured acquire timeout.
    pub async fn acquire(&self) -> RosterResult<PoolConnection<Any>> {
        Ok(self.pool.acquire().await?)
    }

    /// Starts a transaction on a pooled connection.
    pub async fn begin(&self) -> RosterResult<Tx> {
        Ok(self.pool.begin().await?)
    }

    /// Checks if the database connection is healthy.
    pub async fn health_check(&self) -> RosterResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Closes the database pool.
    pub async fn close(&self) {
        info!("Closing database connection pool...");
        self.pool.close().await;
        info!("Database connection pool closed");
    }

    /// Returns `true` once [`close`](Self::close) has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }
}

impl std::fmt::Debug for DatabasePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabasePool")
            .field("dialect", &self.dialect)
            .field("size", &self.pool.size())
            .field("num_idle", &self.pool.num_idle())
            .finish()
    }
}

/// Creates a shared database pool.
pub async fn create_pool(config: &DatabaseConfig) -> RosterResult<Arc<DatabasePool>> {
    let pool = DatabasePool::new(config).await?;
    Ok(Arc::new(pool))
}
