//! Fluent authoring of controls documents for tests

use std::time::Duration;

use domain::{Endpoint, FaultClass};

use super::{ControlsDocument, ControlsError, InjectionKind, InjectionSpec};

/// Builds a [`ControlsDocument`] one injection at a time
///
/// ```
/// use domain::FaultClass;
/// use infrastructure::ControlsBuilder;
///
/// let json = ControlsBuilder::new()
///     .add_exception("exec::scan", "open", FaultClass::Io, 0, 1)
///     .add_pause("exec::work", "setup", 0)
///     .build_json()
///     .unwrap();
/// assert!(json.contains("exec::scan"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ControlsBuilder {
    injections: Vec<InjectionSpec>,
}

impl ControlsBuilder {
    /// Start an empty document
    pub const fn new() -> Self {
        Self {
            injections: Vec::new(),
        }
    }

    fn push(mut self, spec: InjectionSpec) -> Self {
        self.injections.push(spec);
        self
    }

    fn spec(site_class: impl AsRef<str>, desc: &str, kind: InjectionKind) -> InjectionSpec {
        InjectionSpec {
            site_class: site_class.as_ref().to_string(),
            desc: desc.to_string(),
            address: None,
            port: None,
            skip: 0,
            fire: 1,
            kind,
        }
    }

    /// Raise `class` at the site after `skip` calls, for `fire` calls
    pub fn add_exception(
        self,
        site_class: impl AsRef<str>,
        desc: &str,
        class: FaultClass,
        skip: u32,
        fire: u32,
    ) -> Self {
        let spec = InjectionSpec {
            skip,
            fire,
            ..Self::spec(site_class, desc, InjectionKind::Exception {
                class,
                message: None,
            })
        };
        self.push(spec)
    }

    /// Like [`add_exception`](Self::add_exception), armed only on `endpoint`
    pub fn add_exception_on(
        self,
        site_class: impl AsRef<str>,
        desc: &str,
        class: FaultClass,
        skip: u32,
        fire: u32,
        endpoint: &Endpoint,
    ) -> Self {
        let spec = InjectionSpec {
            address: Some(endpoint.address().to_string()),
            port: Some(endpoint.port()),
            skip,
            fire,
            ..Self::spec(site_class, desc, InjectionKind::Exception {
                class,
                message: None,
            })
        };
        self.push(spec)
    }

    /// Pause at the site, once, after `skip` calls, until released
    pub fn add_pause(self, site_class: impl AsRef<str>, desc: &str, skip: u32) -> Self {
        let spec = InjectionSpec {
            skip,
            ..Self::spec(site_class, desc, InjectionKind::Pause { millis: None })
        };
        self.push(spec)
    }

    /// Pause at the site, once, after `skip` calls, for at most `duration`
    pub fn add_timed_pause(
        self,
        site_class: impl AsRef<str>,
        desc: &str,
        skip: u32,
        duration: Duration,
    ) -> Self {
        let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        let spec = InjectionSpec {
            skip,
            ..Self::spec(site_class, desc, InjectionKind::Pause {
                millis: Some(millis),
            })
        };
        self.push(spec)
    }

    /// Give the site a latch starting at `count`
    pub fn add_latch(self, site_class: impl AsRef<str>, desc: &str, count: u64) -> Self {
        self.push(Self::spec(site_class, desc, InjectionKind::Latch { count }))
    }

    /// Finish the document
    pub fn build(self) -> ControlsDocument {
        ControlsDocument {
            injections: self.injections,
        }
    }

    /// Finish the document as JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn build_json(self) -> Result<String, ControlsError> {
        self.build().to_json()
    }
}
