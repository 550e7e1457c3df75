//! Application configuration
//!
//! Loaded from built-in defaults, then an optional `controls.toml` in the
//! working directory, then environment variables such as
//! `EXEC_CONTROLS_TESTING__ENABLED=true` or `EXEC_CONTROLS_ENDPOINT__PORT=31010`.

use std::path::{Path, PathBuf};

use application::TestingMode;
use domain::{DomainError, Endpoint};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::adapters::ExecutionControls;
use crate::controls::{ControlsDocument, ControlsError};
use crate::telemetry::TelemetryConfig;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "EXEC_CONTROLS";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Whether injection sites are live
    #[serde(default)]
    pub testing: TestingConfig,

    /// Inline controls document (JSON)
    #[serde(default)]
    pub controls: Option<String>,

    /// Path to a controls document (JSON)
    #[serde(default)]
    pub controls_file: Option<PathBuf>,

    /// Endpoint the local registry is built for
    #[serde(default)]
    pub endpoint: EndpointConfig,

    /// Log output
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Testing mode configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestingConfig {
    /// Force injection sites on or off; unset follows the build profile
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// Local endpoint configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    #[serde(default = "default_address")]
    pub address: String,

    #[serde(default)]
    pub port: u16,
}

fn default_address() -> String {
    "localhost".to_string()
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            port: 0,
        }
    }
}

impl AppConfig {
    /// Load configuration from `controls.toml` (if present) and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::build(config::File::with_name("controls").required(false))
    }

    /// Load configuration from the given file and the environment
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        Self::build(config::File::from(path).required(true))
    }

    fn build<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let builder = config::Config::builder()
            .set_default("endpoint.address", "localhost")?
            .set_default("endpoint.port", 0)?
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        debug!(
            testing = ?config.testing.enabled,
            endpoint = %format_args!("{}:{}", config.endpoint.address, config.endpoint.port),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Testing mode this configuration asks for
    pub fn testing_mode(&self) -> TestingMode {
        self.testing
            .enabled
            .map_or_else(TestingMode::build_default, TestingMode::from_enabled)
    }

    /// Install [`Self::testing_mode`] as the process-wide mode
    ///
    /// Call before any injector is constructed; injectors built earlier keep
    /// the mode they read.
    ///
    /// # Errors
    ///
    /// Returns the mode already in force if one was installed or read before.
    pub fn install_testing_mode(&self) -> Result<(), TestingMode> {
        TestingMode::install(self.testing_mode())
    }

    /// Load configuration like [`Self::load`] and install its testing mode
    ///
    /// A mode already fixed in this process is kept and logged.
    pub fn load_and_install() -> Result<Self, config::ConfigError> {
        let config = Self::load()?;
        config.install_or_keep();
        Ok(config)
    }

    /// Load configuration like [`Self::load_from`] and install its testing mode
    ///
    /// A mode already fixed in this process is kept and logged.
    pub fn load_from_and_install(path: &Path) -> Result<Self, config::ConfigError> {
        let config = Self::load_from(path)?;
        config.install_or_keep();
        Ok(config)
    }

    fn install_or_keep(&self) {
        if let Err(current) = self.install_testing_mode() {
            debug!(
                requested = %self.testing_mode(),
                current = %current,
                "Keeping testing mode already in force"
            );
        }
    }

    /// The configured local endpoint
    pub fn endpoint(&self) -> Result<Endpoint, DomainError> {
        Endpoint::new(&self.endpoint.address, self.endpoint.port)
    }

    /// The configured controls document; empty when none is configured
    pub fn controls_document(&self) -> Result<ControlsDocument, ControlsError> {
        match (&self.controls, &self.controls_file) {
            (Some(_), Some(_)) => Err(DomainError::ValidationError(
                "set either controls or controls_file, not both".to_string(),
            )
            .into()),
            (Some(json), None) => ControlsDocument::parse(json),
            (None, Some(path)) => ControlsDocument::from_file(path),
            (None, None) => Ok(ControlsDocument::default()),
        }
    }

    /// Build the registry for the configured endpoint
    pub fn execution_controls(&self) -> Result<ExecutionControls, ControlsError> {
        let endpoint = self.endpoint()?;
        let document = self.controls_document()?;
        Ok(ExecutionControls::from_document(&document, &endpoint)?)
    }
}
