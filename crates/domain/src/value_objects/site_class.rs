//! Site class value object

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Identity of the module that owns a set of injection sites
///
/// Usually the module path of the code that declared the injector, e.g.
/// `exec::fragment::root_executor`. Cloning is cheap.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SiteClass(Arc<str>);

impl SiteClass {
    /// Create a site class from a module path or similar identifier
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or contains whitespace.
    pub fn new(name: impl AsRef<str>) -> Result<Self, DomainError> {
        let name = name.as_ref();
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(DomainError::InvalidSiteClass(name.to_string()));
        }
        Ok(Self(Arc::from(name)))
    }

    /// Create a site class from a compile-time module path
    ///
    /// `module_path!()` is never empty nor contains whitespace, so no
    /// validation is performed.
    pub fn from_module_path(path: &'static str) -> Self {
        Self(Arc::from(path))
    }

    /// Get the site class as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SiteClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for SiteClass {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SiteClass> for String {
    fn from(value: SiteClass) -> Self {
        value.0.to_string()
    }
}

impl AsRef<str> for SiteClass {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
