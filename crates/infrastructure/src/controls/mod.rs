//! Controls documents: the JSON form of a set of injections

mod builder;
mod document;
mod error;

pub use builder::ControlsBuilder;
pub(crate) use document::{Armed, ResolvedInjection};
pub use document::{ControlsDocument, InjectionKind, InjectionSpec};
pub use error::ControlsError;
