//! Application builder.

use roster_config::{format_validation_errors, AppConfig, ConfigValidator};
use roster_core::{RosterError, RosterResult};
use roster_repository::{create_pool, DatabasePool, SchemaInitializer, SqlUserRepository};
use roster_service::{UserService, UserServiceImpl};
use std::sync::Arc;
use tracing::info;

/// Application builder for constructing the server.
pub struct AppBuilder {
    config: Option<AppConfig>,
}

impl AppBuilder {
    /// Creates a new application builder.
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Validates the configuration, then connects the pool, creates the
    /// schema and wires the repository into the service.
    pub async fn build(self) -> RosterResult<Application> {
        let config = self.config.unwrap_or_default();
        ConfigValidator::validate(&config)
            .map_err(|errors| RosterError::Configuration(format_validation_errors(&errors)))?;

        let pool = create_pool(&config.database).await?;

        let schema = SchemaInitializer::new(Arc::clone(&pool));
        if let Err(e) = schema.initialize().await {
            pool.close().await;
            return Err(e);
        }

        let user_repository = Arc::new(SqlUserRepository::new(Arc::clone(&pool)));
        let user_service: Arc<dyn UserService> =
            Arc::new(UserServiceImpl::new(Arc::clone(&pool), user_repository));

        info!("Application components initialized");
        Ok(Application {
            config,
            pool,
            schema,
            user_service,
        })
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A fully wired application.
pub struct Application {
    config: AppConfig,
    pool: Arc<DatabasePool>,
    schema: SchemaInitializer,
    user_service: Arc<dyn UserService>,
}

impl Application {
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub fn pool(&self) -> Arc<DatabasePool> {
        Arc::clone(&self.pool)
    }

    #[must_use]
    pub fn schema(&self) -> &SchemaInitializer {
        &self.schema
    }

    #[must_use]
    pub fn user_service(&self) -> Arc<dyn UserService> {
        Arc::clone(&self.user_service)
    }

    /// Closes the connection pool.
    pub async fn shutdown(&self) {
        self.pool.close().await;
        info!("Application shutdown complete");
    }
}
