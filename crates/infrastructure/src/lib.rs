//! Infrastructure layer - Adapters for the injection ports
//!
//! Implements ports defined in the application layer: the in-memory controls
//! registry, the tracing pause log and the execution contexts that own a
//! registry. Also loads controls documents and application configuration.

pub mod adapters;
pub mod config;
pub mod controls;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, EndpointConfig, TestingConfig};
pub use controls::{ControlsBuilder, ControlsDocument, ControlsError, InjectionKind, InjectionSpec};
pub use telemetry::{TelemetryConfig, TelemetryError, init_telemetry};
