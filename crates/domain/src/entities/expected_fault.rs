//! Error types a call site declares it can surface an injected fault as

use std::io;

use super::InjectedFault;
use crate::value_objects::FaultClass;

/// An error type that a checked injection site already returns
///
/// The site keeps its own `Result<_, E>` signature; an injected fault whose
/// class is assignable to [`ExpectedFault::CLASS`] is converted into `E`.
pub trait ExpectedFault: Sized {
    /// The most general fault class this error type can carry
    const CLASS: FaultClass;

    /// Convert an injected fault whose class is assignable to [`Self::CLASS`]
    fn from_injected(fault: InjectedFault) -> Self;
}

impl ExpectedFault for InjectedFault {
    const CLASS: FaultClass = FaultClass::Failure;

    fn from_injected(fault: InjectedFault) -> Self {
        fault
    }
}

impl ExpectedFault for io::Error {
    const CLASS: FaultClass = FaultClass::Io;

    fn from_injected(fault: InjectedFault) -> Self {
        let kind = match fault.class() {
            FaultClass::Timeout => io::ErrorKind::TimedOut,
            _ => io::ErrorKind::Other,
        };
        Self::new(kind, fault)
    }
}
