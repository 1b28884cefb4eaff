//! Common test infrastructure for database integration tests.

#![allow(dead_code)]

use roster_config::DatabaseConfig;
use roster_core::{NewUser, User};
use roster_repository::{in_transaction, DatabasePool, SchemaInitializer, SqlUserRepository, UserRepository};
use std::sync::Arc;
use tempfile::TempDir;
use testcontainers::{runners::AsyncRunner, ContainerAsync, ImageExt};
use testcontainers_modules::mysql::Mysql;

/// Test database backed by a throwaway SQLite file.
///
/// The file lives in a temporary directory that is removed on drop.
pub struct TestDatabase {
    _dir: TempDir,
    config: DatabaseConfig,
    pool: Arc<DatabasePool>,
}

impl TestDatabase {
    /// Creates a fresh database with the `users` table in place.
    pub async fn new() -> Self {
        let db = Self::without_schema().await;
        SchemaInitializer::new(db.pool())
            .initialize()
            .await
            .expect("Failed to initialize schema");
        db
    }

    /// Creates a fresh, empty database.
    pub async fn without_schema() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Creates a fresh database after letting the caller tune the pool settings.
    pub async fn with_config(tune: impl FnOnce(&mut DatabaseConfig)) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("roster.db");
        let mut config = DatabaseConfig::new(format!("sqlite://{}?mode=rwc", path.display()), "sa", "");
        config.max_connections = 5;
        tune(&mut config);

        let pool = DatabasePool::new(&config).await.expect("Failed to open SQLite pool");

        Self {
            _dir: dir,
            config,
            pool: Arc::new(pool),
        }
    }

    /// Returns a reference to the database pool.
    pub fn pool(&self) -> Arc<DatabasePool> {
        Arc::clone(&self.pool)
    }

    /// Returns the configuration the pool was opened with.
    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    pub fn repository(&self) -> SqlUserRepository {
        SqlUserRepository::new(self.pool())
    }
}

/// Test database container wrapper.
///
/// Manages a MySQL testcontainer lifecycle and provides a database pool.
pub struct MySqlTestDatabase {
    _container: ContainerAsync<Mysql>,
    pool: Arc<DatabasePool>,
}

impl MySqlTestDatabase {
    /// Creates a new test database with a fresh MySQL container and schema.
    pub async fn new() -> Self {
        let container = Mysql::default()
            .with_env_var("MYSQL_ROOT_PASSWORD", "testpass")
            .with_env_var("MYSQL_DATABASE", "roster_test")
            .with_env_var("MYSQL_USER", "roster")
            .with_env_var("MYSQL_PASSWORD", "roster")
            .start()
            .await
            .expect("Failed to start MySQL container");

        let port = container
            .get_host_port_ipv4(3306)
            .await
            .expect("Failed to get MySQL port");

        let mut config = DatabaseConfig::new(format!("mysql://127.0.0.1:{}/roster_test", port), "roster", "roster");
        config.max_connections = 5;
        config.connect_timeout_secs = 30;

        let pool = Arc::new(Self::connect_with_retry(&config, 30).await);
        SchemaInitializer::new(Arc::clone(&pool))
            .initialize()
            .await
            .expect("Failed to initialize schema");

        Self {
            _container: container,
            pool,
        }
    }

    pub fn pool(&self) -> Arc<DatabasePool> {
        Arc::clone(&self.pool)
    }

    /// Connects to the database with retry logic.
    async fn connect_with_retry(config: &DatabaseConfig, max_attempts: u32) -> DatabasePool {
        let mut attempts = 0;
        loop {
            attempts += 1;
            match DatabasePool::new(config).await {
                Ok(pool) => return pool,
                Err(e) => {
                    if attempts >= max_attempts {
                        panic!("Failed to connect to database after {} attempts: {}", max_attempts, e);
                    }
                    tokio::time::sleep(std::time::Duration::from_secs(1)).await;
                }
            }
        }
    }
}

/// Inserts a user in its own committed transaction.
pub async fn insert_user(pool: &Arc<DatabasePool>, email: &str, password: &str, name: &str) -> User {
    let repository = SqlUserRepository::new(Arc::clone(pool));
    let new_user = NewUser::new(email, password, name);
    in_transaction(pool, move |tx| Box::pin(async move { repository.insert(tx, &new_user).await }))
        .await
        .expect("Failed to insert user")
}
