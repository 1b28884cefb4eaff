//! Common test infrastructure for service integration tests.

#![allow(dead_code)]

use roster_config::DatabaseConfig;
use roster_repository::{DatabasePool, SchemaInitializer, SqlUserRepository};
use roster_service::UserServiceImpl;
use std::sync::Arc;
use tempfile::TempDir;

/// A service wired to a throwaway SQLite file.
pub struct TestContext {
    _dir: TempDir,
    pub pool: Arc<DatabasePool>,
    pub service: UserServiceImpl<SqlUserRepository>,
}

impl TestContext {
    pub async fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("roster.db");
        let mut config = DatabaseConfig::new(format!("sqlite://{}?mode=rwc", path.display()), "sa", "");
        config.max_connections = 5;

        let pool = Arc::new(DatabasePool::new(&config).await.expect("Failed to open SQLite pool"));
        SchemaInitializer::new(Arc::clone(&pool))
            .initialize()
            .await
            .expect("Failed to initialize schema");

        let repository = Arc::new(SqlUserRepository::new(Arc::clone(&pool)));
        let service = UserServiceImpl::new(Arc::clone(&pool), repository);

        Self {
            _dir: dir,
            pool,
            service,
        }
    }

    /// Rebuilds the service with a different page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.service = self.service.with_page_size(page_size);
        self
    }
}
