//! Tracing initialization.
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and a `fmt`
//! layer. `RUST_LOG` takes precedence over the configured level.

#[cfg(feature = "telemetry")]
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::RosterResult;
use serde::{Deserialize, Serialize};

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable, multi-field lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Telemetry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Default level directive (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Output format.
    #[serde(default)]
    pub log_format: LogFormat,

    /// Whether to include the event target (module path) in output.
    #[serde(default = "default_with_target")]
    pub with_target: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_with_target() -> bool {
    true
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            with_target: default_with_target(),
        }
    }
}

impl TelemetryConfig {
    /// Builds the filter directive used when `RUST_LOG` is unset.
    #[must_use]
    pub fn filter_directive(&self) -> String {
        format!("{level},roster={level},sqlx=warn", level = self.log_level)
    }
}

/// Initialize the global tracing subscriber.
///
/// Fails if a global subscriber is already installed.
#[cfg(feature = "telemetry")]
pub fn init_tracing(config: &TelemetryConfig) -> RosterResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.filter_directive()));

    let registry = tracing_subscriber::registry().with(filter);
    let result = match config.log_format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_target(config.with_target))
            .try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_target(config.with_target))
            .try_init(),
    };

    result.map_err(|e| crate::RosterError::Internal(format!("Failed to install tracing subscriber: {}", e)))?;

    tracing::debug!(
        log_level = %config.log_level,
        log_format = ?config.log_format,
        "Tracing initialized"
    );
    Ok(())
}

/// Placeholder for when the telemetry feature is disabled.
#[cfg(not(feature = "telemetry"))]
pub fn init_tracing(_config: &TelemetryConfig) -> RosterResult<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TelemetryConfig::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.with_target);
    }

    #[test]
    fn test_filter_directive() {
        let config = TelemetryConfig {
            log_level: "debug".to_string(),
            ..TelemetryConfig::default()
        };
        assert_eq!(config.filter_directive(), "debug,roster=debug,sqlx=warn");
    }

    #[test]
    fn test_log_format_deserializes_lowercase() {
        let format: LogFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(format, LogFormat::Json);
    }
}
