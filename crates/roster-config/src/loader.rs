//! Configuration loader with layered sources.

use crate::validation::{format_validation_errors, ConfigValidator};
use crate::{AppConfig, DatabaseConfig};
use config::{Config, ConfigError, Environment, File, Source};
use roster_core::RosterError;
use std::path::Path;
use tracing::{debug, info};

/// Environment variable selecting the `config/{environment}.toml` layer.
pub const ENVIRONMENT_VAR: &str = "ROSTER_ENVIRONMENT";

/// Prefix of environment variable overrides (`ROSTER__DATABASE__URL`).
pub const ENV_PREFIX: &str = "ROSTER";

/// Alternative name of the `database` section, accepted in every layer.
pub const JDBC_SECTION: &str = "jdbc";

const DATABASE_SECTION: &str = "database";

/// Loads and validates the application configuration.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Local overrides
    /// 4. Environment variables with `ROSTER__` prefix (`ROSTER__DATABASE__URL`)
    ///
    /// Each layer may use `[jdbc]` in place of `[database]`; within one layer
    /// `jdbc` keys win. The merged result is validated before it is returned.
    pub fn new(config_dir: impl AsRef<Path>) -> Result<Self, RosterError> {
        let config = Self::load_config(config_dir.as_ref())?;
        Ok(Self { config })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, RosterError> {
        Self::new("./config")
    }

    /// Returns the loaded configuration.
    #[must_use]
    pub fn get(&self) -> &AppConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    #[must_use]
    pub fn into_config(self) -> AppConfig {
        self.config
    }

    /// Loads configuration from the specified directory.
    fn load_config(config_dir: &Path) -> Result<AppConfig, RosterError> {
        // Load .env file if present
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment = std::env::var(ENVIRONMENT_VAR).unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder()
            .set_default("app.environment", environment.as_str())
            .map_err(config_error_to_roster_error)?;

        for layer in ["default", environment.as_str(), "local"] {
            let path = config_dir.join(format!("{}.toml", layer));
            if path.exists() {
                debug!("Loading {} config from: {}", layer, path.display());
                let source = normalize_layer(File::from(path).required(false))
                    .map_err(config_error_to_roster_error)?;
                builder = builder.add_source(source);
            }
        }

        // Override with environment variables (ROSTER__ prefix)
        let env = normalize_layer(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .map_err(config_error_to_roster_error)?;
        builder = builder.add_source(env);

        let config = builder.build().map_err(config_error_to_roster_error)?;

        let mut app_config: AppConfig = config
            .try_deserialize()
            .map_err(config_error_to_roster_error)?;
        apply_verbatim_env(&mut app_config.database, |key| std::env::var(key).ok());

        ConfigValidator::validate(&app_config)
            .map_err(|errors| RosterError::Configuration(format_validation_errors(&errors)))?;

        Ok(app_config)
    }
}

/// Builds one layer on its own, copying any `jdbc.*` keys onto `database.*`.
fn normalize_layer<S>(source: S) -> Result<Config, ConfigError>
where
    S: Source + Send + Sync + 'static,
{
    let layer = Config::builder().add_source(source).build()?;
    let Ok(jdbc) = layer.get_table(JDBC_SECTION) else {
        return Ok(layer);
    };

    debug!("Mapping [{}] settings onto [{}]", JDBC_SECTION, DATABASE_SECTION);
    let mut builder = Config::builder().add_source(layer);
    for (key, value) in jdbc {
        builder = builder.set_override(format!("{}.{}", DATABASE_SECTION, key), value)?;
    }
    builder.build()
}

/// Re-reads string settings from the raw environment.
///
/// `try_parsing` turns numeric-looking values such as `007` into integers,
/// which then come back as `7`.
fn apply_verbatim_env(database: &mut DatabaseConfig, lookup: impl Fn(&str) -> Option<String>) {
    for section in [DATABASE_SECTION, JDBC_SECTION] {
        let var = |key: &str| lookup(&format!("{}__{}__{}", ENV_PREFIX, section.to_uppercase(), key));

        if let Some(url) = var("URL") {
            database.url = Some(url);
        }
        if let Some(username) = var("USERNAME") {
            database.username = Some(username);
        }
        if let Some(password) = var("PASSWORD") {
            database.password = Some(password);
        }
    }
}

fn config_error_to_roster_error(err: ConfigError) -> RosterError {
    RosterError::Configuration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) {
        fs::write(dir.path().join(name), contents).unwrap();
    }

    const DEFAULT_TOML: &str = r#"
[database]
url = "mysql://localhost:3306/roster"
username = "roster"
password = "roster"
max_connections = 4
"#;

    #[test]
    fn test_loads_default_file() {
        let dir = TempDir::new().unwrap();
        write(&dir, "default.toml", DEFAULT_TOML);

        let config = ConfigLoader::new(dir.path()).unwrap().into_config();

        assert_eq!(config.database.url.as_deref(), Some("mysql://localhost:3306/roster"));
        assert_eq!(config.database.max_connections, 4);
        assert_eq!(config.database.min_connections, 1);
        assert!(config.database.auto_commit);
    }

    #[test]
    fn test_local_overrides_default() {
        let dir = TempDir::new().unwrap();
        write(&dir, "default.toml", DEFAULT_TOML);
        write(&dir, "local.toml", "[database]\nmax_connections = 7\n");

        let loader = ConfigLoader::new(dir.path()).unwrap();
        assert_eq!(loader.get().database.max_connections, 7);
    }

    #[test]
    fn test_jdbc_section_is_accepted() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "default.toml",
            "[jdbc]\nurl = \"sqlite::memory:\"\nusername = \"sa\"\npassword = \"\"\n",
        );

        let loader = ConfigLoader::new(dir.path()).unwrap();
        assert_eq!(loader.get().database.username.as_deref(), Some("sa"));
        assert_eq!(loader.get().database.max_connections, 10);
    }

    #[test]
    fn test_jdbc_layer_overrides_database_defaults() {
        let dir = TempDir::new().unwrap();
        write(&dir, "default.toml", DEFAULT_TOML);
        write(&dir, "local.toml", "[jdbc]\nurl = \"sqlite::memory:\"\n");

        let config = ConfigLoader::new(dir.path()).unwrap().into_config();
        assert_eq!(config.database.url.as_deref(), Some("sqlite::memory:"));
        assert_eq!(config.database.username.as_deref(), Some("roster"));
        assert_eq!(config.database.max_connections, 4);
    }

    #[test]
    fn test_database_layer_overrides_jdbc_defaults() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "default.toml",
            "[jdbc]\nurl = \"mysql://localhost/roster\"\nusername = \"app\"\npassword = \"pw\"\n",
        );
        write(&dir, "local.toml", "[database]\nusername = \"local\"\n");

        let config = ConfigLoader::new(dir.path()).unwrap().into_config();
        assert_eq!(config.database.url.as_deref(), Some("mysql://localhost/roster"));
        assert_eq!(config.database.username.as_deref(), Some("local"));
    }

    #[test]
    fn test_verbatim_env_keeps_numeric_looking_password() {
        let vars: HashMap<&str, &str> = [
            ("ROSTER__DATABASE__PASSWORD", "007"),
            ("ROSTER__DATABASE__USERNAME", "0042"),
        ]
        .into_iter()
        .collect();
        let mut database = DatabaseConfig::new("mysql://localhost/roster", "app", "7");

        apply_verbatim_env(&mut database, |key| vars.get(key).map(|v| (*v).to_string()));

        assert_eq!(database.password.as_deref(), Some("007"));
        assert_eq!(database.username.as_deref(), Some("0042"));
        assert_eq!(database.url.as_deref(), Some("mysql://localhost/roster"));
    }

    #[test]
    fn test_verbatim_env_jdbc_wins_over_database() {
        let vars: HashMap<&str, &str> = [
            ("ROSTER__DATABASE__URL", "mysql://db-a/roster"),
            ("ROSTER__JDBC__URL", "mysql://db-b/roster"),
        ]
        .into_iter()
        .collect();
        let mut database = DatabaseConfig::default();

        apply_verbatim_env(&mut database, |key| vars.get(key).map(|v| (*v).to_string()));

        assert_eq!(database.url.as_deref(), Some("mysql://db-b/roster"));
        assert!(database.password.is_none());
    }

    #[test]
    fn test_missing_settings_is_configuration_error() {
        let dir = TempDir::new().unwrap();
        write(&dir, "default.toml", "[database]\nurl = \"mysql://localhost/roster\"\n");

        let err = ConfigLoader::new(dir.path()).err().unwrap();
        assert!(err.is_fatal());
        assert!(err.to_string().contains("database.username"));
        assert!(err.to_string().contains("database.password"));
    }

    #[test]
    fn test_auto_commit_off_is_rejected() {
        let dir = TempDir::new().unwrap();
        write(&dir, "default.toml", DEFAULT_TOML);
        write(&dir, "local.toml", "[database]\nauto_commit = false\n");

        let err = ConfigLoader::new(dir.path()).err().unwrap();
        assert!(matches!(err, RosterError::Configuration(_)));
    }

    #[test]
    fn test_malformed_file_is_configuration_error() {
        let dir = TempDir::new().unwrap();
        write(&dir, "default.toml", "[database\nurl = ");

        let err = ConfigLoader::new(dir.path()).err().unwrap();
        assert!(matches!(err, RosterError::Configuration(_)));
    }

    #[test]
    fn test_invalid_pool_size_is_rejected() {
        let dir = TempDir::new().unwrap();
        write(&dir, "default.toml", DEFAULT_TOML);
        write(&dir, "local.toml", "[database]\nmin_connections = 50\n");

        let err = ConfigLoader::new(dir.path()).err().unwrap();
        assert!(err.to_string().contains("Invalid pool size"));
    }
}
