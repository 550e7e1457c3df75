//! Errors raised while loading a controls document

use std::io;
use std::path::PathBuf;

use domain::DomainError;
use thiserror::Error;

/// Failure to read, parse or validate a controls document
#[derive(Debug, Error)]
pub enum ControlsError {
    /// The document is not well-formed JSON or has the wrong shape
    #[error("Malformed controls document: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document is well-formed but describes an impossible injection
    #[error(transparent)]
    Invalid(#[from] DomainError),

    /// The document file could not be read
    #[error("Failed to read controls file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ControlsError {
    /// Create an I/O error for the given path
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the document itself is at fault rather than the filesystem
    pub const fn is_document_error(&self) -> bool {
        matches!(self, Self::Parse(_) | Self::Invalid(_))
    }
}
