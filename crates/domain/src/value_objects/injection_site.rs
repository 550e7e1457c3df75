//! Injection site identity

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::SiteClass;
use crate::errors::DomainError;

/// A named point in production code where a fault may be simulated
///
/// Identified by the owning module and a description chosen by the author of
/// the call site. Two sites are the same site when both parts are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InjectionSite {
    site_class: SiteClass,
    desc: Arc<str>,
}

impl InjectionSite {
    /// Create a validated injection site
    ///
    /// # Errors
    ///
    /// Returns an error if the description is empty.
    pub fn new(site_class: SiteClass, desc: impl AsRef<str>) -> Result<Self, DomainError> {
        let desc = desc.as_ref();
        if desc.trim().is_empty() {
            return Err(DomainError::InvalidDescription {
                site_class: site_class.to_string(),
                desc: desc.to_string(),
            });
        }
        Ok(Self::lookup_key(site_class, desc))
    }

    /// Build a site for lookup purposes without validating the description
    ///
    /// Call sites may pass any label; one that was never configured simply
    /// resolves to nothing.
    pub fn lookup_key(site_class: SiteClass, desc: &str) -> Self {
        Self {
            site_class,
            desc: Arc::from(desc),
        }
    }

    /// The module owning this site
    pub const fn site_class(&self) -> &SiteClass {
        &self.site_class
    }

    /// The site description
    pub fn desc(&self) -> &str {
        &self.desc
    }
}

impl fmt::Display for InjectionSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.site_class, self.desc)
    }
}
