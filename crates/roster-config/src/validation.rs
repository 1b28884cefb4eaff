//! Configuration validation module.
//!
//! Provides comprehensive validation for all configuration values,
//! failing fast on invalid configuration rather than at runtime.

use crate::{AppConfig, SUPPORTED_SCHEMES};
use std::fmt;
use url::Url;

/// Configuration validation error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// A required setting is absent.
    MissingSetting { name: String },
    /// URL format is invalid.
    InvalidUrl { url_type: String, message: String },
    /// Autocommit was turned off; reads depend on it.
    AutoCommitDisabled,
    /// Pool size configuration is invalid (min must be <= max).
    InvalidPoolSize { min: u32, max: u32 },
    /// Pool size exceeds maximum allowed.
    PoolSizeTooLarge { value: u32, maximum: u32 },
    /// Timeout value must be positive.
    NonPositiveTimeout { name: String, value: u64 },
    /// Log level is invalid.
    InvalidLogLevel { value: String },
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSetting { name } => write!(f, "Missing required setting: {}", name),
            Self::InvalidUrl { url_type, message } => {
                write!(f, "Invalid {} URL: {}", url_type, message)
            }
            Self::AutoCommitDisabled => {
                write!(f, "database.auto_commit must be true")
            }
            Self::InvalidPoolSize { min, max } => {
                write!(
                    f,
                    "Invalid pool size: min ({}) cannot be greater than max ({})",
                    min, max
                )
            }
            Self::PoolSizeTooLarge { value, maximum } => {
                write!(
                    f,
                    "Pool size {} exceeds maximum allowed ({})",
                    value, maximum
                )
            }
            Self::NonPositiveTimeout { name, value } => {
                write!(f, "Timeout '{}' must be positive, got {}", name, value)
            }
            Self::InvalidLogLevel { value } => {
                write!(
                    f,
                    "Invalid log level: '{}' (valid: trace, debug, info, warn, error)",
                    value
                )
            }
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Result of configuration validation containing all errors found.
#[derive(Debug)]
pub struct ValidationResult {
    errors: Vec<ConfigValidationError>,
}

impl ValidationResult {
    fn new() -> Self {
        Self { errors: Vec::new() }
    }

    fn add_error(&mut self, error: ConfigValidationError) {
        self.errors.push(error);
    }

    /// Converts to Result, returning Err with all errors if any exist.
    pub fn into_result(self) -> Result<(), Vec<ConfigValidationError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Maximum connection pool size.
    const MAX_POOL_SIZE: u32 = 1000;
    /// Valid log levels.
    const VALID_LOG_LEVELS: &'static [&'static str] = &["trace", "debug", "info", "warn", "error"];

    /// Validates the entire application configuration.
    ///
    /// Returns Ok(()) if valid, or Err with all validation errors found.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut result = ValidationResult::new();

        Self::validate_database(&config.database, &mut result);
        Self::validate_telemetry(&config.telemetry, &mut result);

        result.into_result()
    }

    /// Validates database configuration.
    fn validate_database(config: &crate::DatabaseConfig, result: &mut ValidationResult) {
        match config.url.as_deref().map(str::trim) {
            None | Some("") => result.add_error(ConfigValidationError::MissingSetting {
                name: "database.url".to_string(),
            }),
            Some(url) => Self::validate_database_url(url, config.scheme(), result),
        }

        if config.username.as_deref().map_or(true, |name| name.trim().is_empty()) {
            result.add_error(ConfigValidationError::MissingSetting {
                name: "database.username".to_string(),
            });
        }
        if config.password.is_none() {
            result.add_error(ConfigValidationError::MissingSetting {
                name: "database.password".to_string(),
            });
        }

        if !config.auto_commit {
            result.add_error(ConfigValidationError::AutoCommitDisabled);
        }

        // Pool size validation
        if config.min_connections > config.max_connections {
            result.add_error(ConfigValidationError::InvalidPoolSize {
                min: config.min_connections,
                max: config.max_connections,
            });
        }
        if config.max_connections > Self::MAX_POOL_SIZE {
            result.add_error(ConfigValidationError::PoolSizeTooLarge {
                value: config.max_connections,
                maximum: Self::MAX_POOL_SIZE,
            });
        }

        // Timeouts
        if config.connect_timeout_secs == 0 {
            result.add_error(ConfigValidationError::NonPositiveTimeout {
                name: "database.connect_timeout_secs".to_string(),
                value: 0,
            });
        }
        if config.idle_timeout_secs == 0 {
            result.add_error(ConfigValidationError::NonPositiveTimeout {
                name: "database.idle_timeout_secs".to_string(),
                value: 0,
            });
        }
    }

    fn validate_database_url(url: &str, scheme: Option<&str>, result: &mut ValidationResult) {
        match scheme {
            Some(scheme) if SUPPORTED_SCHEMES.contains(&scheme) => {
                // SQLite URLs such as `sqlite::memory:` are not RFC 3986 URLs.
                if scheme != "sqlite" {
                    if let Err(e) = Url::parse(url) {
                        result.add_error(ConfigValidationError::InvalidUrl {
                            url_type: "database".to_string(),
                            message: e.to_string(),
                        });
                    }
                }
            }
            _ => result.add_error(ConfigValidationError::InvalidUrl {
                url_type: "database".to_string(),
                message: format!("URL must start with one of: {}", SUPPORTED_SCHEMES.join(", ")),
            }),
        }
    }

    /// Validates logging configuration.
    fn validate_telemetry(config: &roster_core::telemetry::TelemetryConfig, result: &mut ValidationResult) {
        let level = config.log_level.to_lowercase();
        if !Self::VALID_LOG_LEVELS.contains(&level.as_str()) {
            result.add_error(ConfigValidationError::InvalidLogLevel {
                value: config.log_level.clone(),
            });
        }
    }
}

/// Formats validation errors for display.
#[must_use]
pub fn format_validation_errors(errors: &[ConfigValidationError]) -> String {
    let mut output = String::from("Configuration validation failed:\n");
    for (i, error) in errors.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, error));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DatabaseConfig;

    fn valid_config() -> AppConfig {
        AppConfig {
            database: DatabaseConfig::new("mysql://localhost:3306/roster", "roster", "roster"),
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_valid_config_passes() {
        let config = valid_config();
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_sqlite_memory_url_passes() {
        let mut config = valid_config();
        config.database.url = Some("sqlite::memory:".to_string());
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_default_config_reports_missing_settings() {
        let errors = ConfigValidator::validate(&AppConfig::default()).unwrap_err();
        let missing: Vec<_> = errors
            .iter()
            .filter_map(|e| match e {
                ConfigValidationError::MissingSetting { name } => Some(name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(missing, vec!["database.url", "database.username", "database.password"]);
    }

    #[test]
    fn test_empty_password_is_allowed() {
        let mut config = valid_config();
        config.database.password = Some(String::new());
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_auto_commit_disabled() {
        let mut config = valid_config();
        config.database.auto_commit = false;

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(errors.contains(&ConfigValidationError::AutoCommitDisabled));
    }

    #[test]
    fn test_invalid_pool_size() {
        let mut config = valid_config();
        config.database.min_connections = 100;
        config.database.max_connections = 10;

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(errors.iter().any(|e| matches!(
            e,
            ConfigValidationError::InvalidPoolSize { .. }
        )));
    }

    #[test]
    fn test_pool_size_too_large() {
        let mut config = valid_config();
        config.database.max_connections = 2000;

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(errors.iter().any(|e| matches!(
            e,
            ConfigValidationError::PoolSizeTooLarge { .. }
        )));
    }

    #[test]
    fn test_unsupported_database_url() {
        let mut config = valid_config();
        config.database.url = Some("postgres://localhost/roster".to_string());

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(errors.iter().any(|e| matches!(
            e,
            ConfigValidationError::InvalidUrl { url_type, .. } if url_type == "database"
        )));
    }

    #[test]
    fn test_zero_timeouts() {
        let mut config = valid_config();
        config.database.connect_timeout_secs = 0;
        config.database.idle_timeout_secs = 0;

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(
            errors
                .iter()
                .filter(|e| matches!(e, ConfigValidationError::NonPositiveTimeout { .. }))
                .count(),
            2
        );
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = valid_config();
        config.telemetry.log_level = "verbose".to_string();

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(errors.iter().any(|e| matches!(
            e,
            ConfigValidationError::InvalidLogLevel { .. }
        )));
    }

    #[test]
    fn test_format_validation_errors() {
        let errors = vec![
            ConfigValidationError::MissingSetting {
                name: "database.url".to_string(),
            },
            ConfigValidationError::AutoCommitDisabled,
        ];

        let output = format_validation_errors(&errors);
        assert!(output.contains("1. Missing required setting: database.url"));
        assert!(output.contains("2. database.auto_commit must be true"));
    }
}
