//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Site class is empty or malformed
    #[error("Invalid site class: {0:?}")]
    InvalidSiteClass(String),

    /// Site description is empty
    #[error("Invalid site description for {site_class}: {desc:?}")]
    InvalidDescription { site_class: String, desc: String },

    /// Fire schedule can never fire
    #[error("Invalid schedule for {site}: {reason}")]
    InvalidSchedule { site: String, reason: String },

    /// Fault class name is not known
    #[error("Unknown fault class: {0}")]
    UnknownFaultClass(String),

    /// Endpoint filter is malformed
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create an invalid schedule error
    pub fn invalid_schedule(site: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSchedule {
            site: site.into(),
            reason: reason.into(),
        }
    }
}
