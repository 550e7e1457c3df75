//! Application services
//!
//! Site injectors and the testing mode that selects between them.

mod controls_injector;
mod testing_mode;

pub use controls_injector::{ControlsInjector, LiveInjector, NoOpInjector, SiteInjector};
pub use testing_mode::TestingMode;
