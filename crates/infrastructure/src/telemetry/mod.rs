//! Logging setup
//!
//! Installs the `tracing` subscriber that injection events are written to.

mod subscriber;

pub use subscriber::{TelemetryConfig, TelemetryError, init_telemetry};
