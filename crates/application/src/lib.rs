//! Application layer - Injection dispatch
//!
//! Contains the site injector that production code calls at injection sites,
//! the process-wide testing mode, and the ports the injector consumes:
//! the controls registry of the current execution context and the pause log.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;

/// Create a [`ControlsInjector`] owned by the calling module
///
/// The site class is the caller's `module_path!()`. Declare one per module
/// and reuse it for every site in that module:
///
/// ```ignore
/// use std::sync::LazyLock;
/// use application::{ControlsInjector, controls_injector};
///
/// static INJECTOR: LazyLock<ControlsInjector> = LazyLock::new(|| controls_injector!());
/// ```
#[macro_export]
macro_rules! controls_injector {
    () => {
        $crate::services::ControlsInjector::for_module(::core::module_path!())
    };
}
