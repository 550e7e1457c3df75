//! Application-level errors

use domain::{DomainError, FaultClass};
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A checked injection site resolved a fault its declared type cannot carry
    #[error(
        "Injection at {site} raises {configured} which is not assignable to the expected {expected}"
    )]
    ConfigurationMismatch {
        site: String,
        configured: FaultClass,
        expected: FaultClass,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Check if this error reports a broken controls configuration
    pub const fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigurationMismatch { .. } | Self::Configuration(_)
        )
    }
}
