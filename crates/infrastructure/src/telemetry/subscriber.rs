//! `tracing-subscriber` initialization
//!
//! Console output through the fmt layer, filtered by `RUST_LOG` when set and
//! by the configured filter otherwise.

use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Configuration for log output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Log level filter (e.g., "info", "debug", "infrastructure=debug,application=info")
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Include thread ids in every line; useful when following paused workers
    #[serde(default = "default_true")]
    pub thread_ids: bool,

    /// Include source file and line in every line
    #[serde(default)]
    pub source_location: bool,
}

fn default_log_filter() -> String {
    "info".to_string()
}

const fn default_true() -> bool {
    true
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            thread_ids: default_true(),
            source_location: false,
        }
    }
}

impl TelemetryConfig {
    /// Configuration with the given filter and default formatting
    pub fn with_filter(log_filter: impl Into<String>) -> Self {
        Self {
            log_filter: log_filter.into(),
            ..Self::default()
        }
    }
}

/// Install the global subscriber
///
/// # Errors
///
/// Returns an error if the configured filter is invalid or a global
/// subscriber is already installed.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_filter)
            .map_err(|e| TelemetryError::Filter(e.to_string()))?,
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(config.thread_ids)
        .with_file(config.source_location)
        .with_line_number(config.source_location);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| TelemetryError::Init(e.to_string()))?;

    info!(filter = %config.log_filter, "Telemetry initialized");
    Ok(())
}

/// Error type for telemetry initialization
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// The log filter could not be parsed
    #[error("Invalid log filter: {0}")]
    Filter(String),

    /// A global subscriber could not be installed
    #[error("Failed to initialize tracing subscriber: {0}")]
    Init(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = TelemetryConfig::default();
        assert_eq!(config.log_filter, "info");
        assert!(config.thread_ids);
        assert!(!config.source_location);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let parsed: TelemetryConfig = serde_json::from_str(r#"{"log_filter": "debug"}"#).unwrap();
        assert_eq!(parsed, TelemetryConfig {
            log_filter: "debug".to_string(),
            ..TelemetryConfig::default()
        });
    }

    #[test]
    fn second_init_fails() {
        let config = TelemetryConfig::with_filter("warn");
        let _ = init_telemetry(&config);
        assert!(matches!(
            init_telemetry(&config),
            Err(TelemetryError::Init(_))
        ));
    }
}
