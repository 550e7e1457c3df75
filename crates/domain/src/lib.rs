//! Domain layer for execution controls
//!
//! Contains injection site identity, fault classes, injection descriptors and
//! the blocking primitives that pause and latch descriptors are built on.
//! This layer knows nothing about how controls are authored or looked up.

pub mod entities;
pub mod errors;
pub mod sync;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use sync::{CountDownLatch, Interrupt, Interrupted};
pub use value_objects::*;
