//! Port definitions for application layer
//!
//! Ports are interfaces that define how the injector interacts with its
//! collaborators. Adapters in the infrastructure layer implement these ports.

mod controls_source;
mod execution_controls_port;
mod pause_log_port;

pub use controls_source::ControlsSource;
#[cfg(test)]
pub use execution_controls_port::MockExecutionControlsPort;
pub use execution_controls_port::ExecutionControlsPort;
#[cfg(test)]
pub use pause_log_port::MockPauseLogPort;
pub use pause_log_port::PauseLogPort;
