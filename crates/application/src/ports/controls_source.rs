//! Anything an injection site can hand to the injector to find its controls
//!
//! A site may hold the registry itself, an execution context that owns one,
//! or nothing at all when no context was ever established.

use std::sync::Arc;

use super::ExecutionControlsPort;

/// Source of the controls registry for the current execution context
///
/// `None` means no injections are active; the injector treats it as a no-op.
pub trait ControlsSource {
    /// The registry, if the context has one
    fn controls(&self) -> Option<&dyn ExecutionControlsPort>;
}

impl<'a> ControlsSource for dyn ExecutionControlsPort + 'a {
    fn controls(&self) -> Option<&dyn ExecutionControlsPort> {
        Some(self)
    }
}

impl<T: ControlsSource + ?Sized> ControlsSource for &T {
    fn controls(&self) -> Option<&dyn ExecutionControlsPort> {
        (**self).controls()
    }
}

impl<T: ControlsSource + ?Sized> ControlsSource for Arc<T> {
    fn controls(&self) -> Option<&dyn ExecutionControlsPort> {
        (**self).controls()
    }
}

impl<T: ControlsSource + ?Sized> ControlsSource for Box<T> {
    fn controls(&self) -> Option<&dyn ExecutionControlsPort> {
        (**self).controls()
    }
}

impl<T: ControlsSource> ControlsSource for Option<T> {
    fn controls(&self) -> Option<&dyn ExecutionControlsPort> {
        self.as_ref().and_then(ControlsSource::controls)
    }
}
