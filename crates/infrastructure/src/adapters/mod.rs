//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod execution_context;
mod execution_controls;
mod tracing_pause_log;

pub use execution_context::{FragmentContext, QueryContext};
pub use execution_controls::{ControlsStats, ExecutionControls};
pub use tracing_pause_log::TracingPauseLog;
