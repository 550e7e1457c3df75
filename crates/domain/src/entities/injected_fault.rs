//! The fault value raised by an exception injection

use std::any::Any;

use serde::Serialize;
use thiserror::Error;

use crate::value_objects::{FaultClass, InjectionSite};

/// A simulated failure raised at an injection site
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("Injected {class} fault at {site}: {message}")]
pub struct InjectedFault {
    class: FaultClass,
    site: InjectionSite,
    message: String,
}

impl InjectedFault {
    /// Create a fault
    pub fn new(class: FaultClass, site: InjectionSite, message: impl Into<String>) -> Self {
        Self {
            class,
            site,
            message: message.into(),
        }
    }

    /// Class of the fault
    pub const fn class(&self) -> FaultClass {
        self.class
    }

    /// Site where the fault was raised
    pub const fn site(&self) -> &InjectionSite {
        &self.site
    }

    /// Fault message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Recover an injected fault from a caught panic payload
    ///
    /// Unchecked injections unwind with the fault as the panic payload.
    pub fn from_panic(payload: &(dyn Any + Send)) -> Option<&Self> {
        payload.downcast_ref::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::SiteClass;

    fn site() -> InjectionSite {
        InjectionSite::new(SiteClass::new("exec::scan").unwrap(), "next-batch").unwrap()
    }

    #[test]
    fn injected_fault_display() {
        let fault = InjectedFault::new(FaultClass::Io, site(), "disk went away");
        assert_eq!(
            fault.to_string(),
            "Injected io fault at exec::scan/next-batch: disk went away"
        );
    }

    #[test]
    fn from_panic_downcasts_fault_payload() {
        let fault = InjectedFault::new(FaultClass::Runtime, site(), "boom");
        let payload: Box<dyn Any + Send> = Box::new(fault.clone());
        assert_eq!(InjectedFault::from_panic(payload.as_ref()), Some(&fault));
    }

    #[test]
    fn from_panic_ignores_other_payloads() {
        let payload: Box<dyn Any + Send> = Box::new("plain panic");
        assert!(InjectedFault::from_panic(payload.as_ref()).is_none());
    }
}
