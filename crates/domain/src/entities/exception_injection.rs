//! Exception injection descriptor

use serde::Serialize;

use super::InjectedFault;
use crate::value_objects::{FaultClass, InjectionSite};

/// A configured fault to raise at one site
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExceptionInjection {
    site: InjectionSite,
    class: FaultClass,
    message: Option<String>,
}

impl ExceptionInjection {
    /// Create an exception injection
    pub const fn new(site: InjectionSite, class: FaultClass) -> Self {
        Self {
            site,
            class,
            message: None,
        }
    }

    /// Set the message carried by the raised fault
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Site this injection targets
    pub const fn site(&self) -> &InjectionSite {
        &self.site
    }

    /// Class of the raised fault
    pub const fn class(&self) -> FaultClass {
        self.class
    }

    /// Whether the configured class must be declared by the call site
    pub const fn is_checked(&self) -> bool {
        self.class.is_checked()
    }

    /// Build the fault this injection raises
    pub fn to_fault(&self) -> InjectedFault {
        let message = self
            .message
            .clone()
            .unwrap_or_else(|| format!("<{}>", self.site.desc()));
        InjectedFault::new(self.class, self.site.clone(), message)
    }
}
