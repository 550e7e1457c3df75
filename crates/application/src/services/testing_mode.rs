//! Process-wide switch between live and no-op injectors

use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

static INSTALLED: OnceLock<TestingMode> = OnceLock::new();

/// Whether injection sites are live in this process
///
/// Fixed the first time it is read. Injectors consult it once, when they are
/// constructed, and never again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestingMode {
    /// Injection sites resolve and apply configured injections
    Enabled,
    /// Injection sites do nothing
    Disabled,
}

impl TestingMode {
    /// Mode used when none was installed: enabled in debug builds only
    pub const fn build_default() -> Self {
        if cfg!(debug_assertions) {
            Self::Enabled
        } else {
            Self::Disabled
        }
    }

    /// Map a boolean flag to a mode
    pub const fn from_enabled(enabled: bool) -> Self {
        if enabled { Self::Enabled } else { Self::Disabled }
    }

    /// Whether injection sites are live
    pub const fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled)
    }

    /// Install the process-wide mode
    ///
    /// Succeeds only once, and only if the mode was not read before.
    ///
    /// # Errors
    ///
    /// Returns the mode already in force when it was installed or read earlier.
    pub fn install(mode: Self) -> Result<(), Self> {
        match INSTALLED.set(mode) {
            Ok(()) => {
                debug!(mode = %mode, "Testing mode installed");
                Ok(())
            },
            Err(_) => {
                let current = Self::current();
                if current != mode {
                    warn!(requested = %mode, current = %current, "Testing mode already fixed");
                }
                Err(current)
            },
        }
    }

    /// The process-wide mode, fixing the build default if none was installed
    pub fn current() -> Self {
        *INSTALLED.get_or_init(Self::build_default)
    }
}

impl fmt::Display for TestingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enabled => write!(f, "enabled"),
            Self::Disabled => write!(f, "disabled"),
        }
    }
}
