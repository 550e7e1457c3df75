//! Fault classes that exception injections can raise
//!
//! Classes form a small hierarchy rooted at [`FaultClass::Failure`]. A call
//! site that declares it can surface some class accepts every class below it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Category of an injected fault
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultClass {
    /// Root of the hierarchy; any fault is a failure
    Failure,
    /// Unchecked failure of unspecified cause
    Runtime,
    /// Unchecked failure caused by a violated internal invariant
    IllegalState,
    /// Unchecked failure caused by memory exhaustion
    OutOfMemory,
    /// Checked I/O failure
    Io,
    /// Checked I/O failure caused by an expired deadline
    Timeout,
    /// Checked failure while setting up execution of a fragment
    Setup,
}

impl FaultClass {
    /// All known classes
    pub const ALL: [Self; 7] = [
        Self::Failure,
        Self::Runtime,
        Self::IllegalState,
        Self::OutOfMemory,
        Self::Io,
        Self::Timeout,
        Self::Setup,
    ];

    /// The direct parent class, `None` for the root
    pub const fn parent(self) -> Option<Self> {
        match self {
            Self::Failure => None,
            Self::Runtime | Self::OutOfMemory | Self::Io | Self::Setup => Some(Self::Failure),
            Self::IllegalState => Some(Self::Runtime),
            Self::Timeout => Some(Self::Io),
        }
    }

    /// Whether a call site must declare this class to surface it
    ///
    /// Unchecked classes can be raised at any site without being declared.
    pub const fn is_checked(self) -> bool {
        !matches!(self, Self::Runtime | Self::IllegalState | Self::OutOfMemory)
    }

    /// Whether a fault of this class can be surfaced as `expected`
    pub fn is_assignable_to(self, expected: Self) -> bool {
        let mut current = Some(self);
        while let Some(class) = current {
            if class == expected {
                return true;
            }
            current = class.parent();
        }
        false
    }

    /// Stable name used in controls documents
    pub const fn name(self) -> &'static str {
        match self {
            Self::Failure => "failure",
            Self::Runtime => "runtime",
            Self::IllegalState => "illegal_state",
            Self::OutOfMemory => "out_of_memory",
            Self::Io => "io",
            Self::Timeout => "timeout",
            Self::Setup => "setup",
        }
    }
}

impl fmt::Display for FaultClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FaultClass {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|class| class.name() == normalized)
            .ok_or_else(|| DomainError::UnknownFaultClass(s.to_string()))
    }
}
