//! Controls document
//!
//! The JSON form in which a test harness describes the injections active for
//! one query:
//!
//! ```json
//! {"injections": [
//!   {"type": "exception", "siteClass": "exec::scan", "desc": "open",
//!    "exceptionClass": "io", "nSkip": 1, "nFire": 2},
//!   {"type": "pause", "siteClass": "exec::work", "desc": "setup",
//!    "address": "10.0.0.5", "port": 31010},
//!   {"type": "latch", "siteClass": "exec::sort", "desc": "spill", "count": 2}
//! ]}
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use domain::{
    CountDownLatchInjection, DomainError, EndpointFilter, ExceptionInjection, FaultClass,
    InjectionSchedule, InjectionSite, PauseInjection, SiteClass,
};
use serde::{Deserialize, Serialize};

use super::ControlsError;

const fn default_fire() -> u32 {
    1
}

const fn default_latch_count() -> u64 {
    1
}

const fn is_default_fire(fire: &u32) -> bool {
    *fire == 1
}

const fn is_zero(skip: &u32) -> bool {
    *skip == 0
}

/// Set of injections for one execution
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlsDocument {
    #[serde(default)]
    pub injections: Vec<InjectionSpec>,
}

/// One configured injection, as written in the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InjectionSpec {
    /// Module owning the site
    pub site_class: String,

    /// Site description within the module
    pub desc: String,

    /// Only arm the injection on the endpoint with this address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Only arm the injection on the endpoint with this port; requires `address`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Calls to let through before firing
    #[serde(default, rename = "nSkip", skip_serializing_if = "is_zero")]
    pub skip: u32,

    /// Calls that fire once skipping is over
    #[serde(default = "default_fire", rename = "nFire", skip_serializing_if = "is_default_fire")]
    pub fire: u32,

    #[serde(flatten)]
    pub kind: InjectionKind,
}

/// What an injection does when it fires
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InjectionKind {
    /// Raise a fault of the given class
    Exception {
        #[serde(rename = "exceptionClass")]
        class: FaultClass,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    /// Block the calling thread until released, or for a fixed time
    Pause {
        #[serde(rename = "pauseMillis", default, skip_serializing_if = "Option::is_none")]
        millis: Option<u64>,
    },
    /// Hand the site a countdown latch
    Latch {
        #[serde(default = "default_latch_count")]
        count: u64,
    },
}

impl InjectionKind {
    /// Name of the kind as written in the document
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Exception { .. } => "exception",
            Self::Pause { .. } => "pause",
            Self::Latch { .. } => "latch",
        }
    }
}

/// Descriptor armed for a resolved injection
#[derive(Debug, Clone)]
pub(crate) enum Armed {
    Exception(ExceptionInjection),
    Pause(PauseInjection),
    Latch(CountDownLatchInjection),
}

/// An injection spec checked and turned into domain values
#[derive(Debug, Clone)]
pub(crate) struct ResolvedInjection {
    pub(crate) site: InjectionSite,
    pub(crate) filter: EndpointFilter,
    pub(crate) schedule: InjectionSchedule,
    pub(crate) armed: Armed,
}

impl InjectionSpec {
    /// The site this spec targets
    ///
    /// # Errors
    ///
    /// Returns an error if the site class or description is blank.
    pub fn site(&self) -> Result<InjectionSite, DomainError> {
        InjectionSite::new(SiteClass::new(&self.site_class)?, &self.desc)
    }

    pub(crate) fn resolve(&self) -> Result<ResolvedInjection, DomainError> {
        let site = self.site()?;
        let filter = EndpointFilter::new(self.address.clone(), self.port)?;
        let schedule = InjectionSchedule::new(self.skip, self.fire)
            .map_err(|_| DomainError::invalid_schedule(site.to_string(), "nFire must be positive"))?;

        let armed = match &self.kind {
            InjectionKind::Exception { class, message } => {
                let injection = ExceptionInjection::new(site.clone(), *class);
                Armed::Exception(match message {
                    Some(message) => injection.with_message(message.clone()),
                    None => injection,
                })
            },
            InjectionKind::Pause { millis: None } => Armed::Pause(PauseInjection::new(site.clone())),
            InjectionKind::Pause {
                millis: Some(millis),
            } => Armed::Pause(PauseInjection::timed(
                site.clone(),
                Duration::from_millis(*millis),
            )),
            InjectionKind::Latch { count } => {
                if self.skip != 0 || self.fire != 1 {
                    return Err(DomainError::invalid_schedule(
                        site.to_string(),
                        "latch injections cannot be scheduled",
                    ));
                }
                Armed::Latch(CountDownLatchInjection::new(site.clone(), *count))
            },
        };

        Ok(ResolvedInjection {
            site,
            filter,
            schedule,
            armed,
        })
    }
}

impl ControlsDocument {
    /// Parse and validate a JSON document
    ///
    /// An empty or whitespace-only string is an empty document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or an injection is invalid.
    pub fn parse(json: &str) -> Result<Self, ControlsError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let document: Self = serde_json::from_str(json)?;
        document.validate()?;
        Ok(document)
    }

    /// Read, parse and validate a JSON document from a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are invalid.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ControlsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| ControlsError::io(path, e))?;
        Self::parse(&json)
    }

    /// Check every injection
    ///
    /// # Errors
    ///
    /// Returns the first invalid injection's error.
    pub fn validate(&self) -> Result<(), DomainError> {
        self.injections
            .iter()
            .try_for_each(|spec| spec.resolve().map(|_| ()))
    }

    /// Serialize to compact JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, ControlsError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Number of configured injections
    pub fn len(&self) -> usize {
        self.injections.len()
    }

    /// Whether no injections are configured
    pub fn is_empty(&self) -> bool {
        self.injections.is_empty()
    }

    pub(crate) fn resolve(&self) -> Result<Vec<ResolvedInjection>, DomainError> {
        self.injections.iter().map(InjectionSpec::resolve).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{"injections": [
        {"type": "exception", "siteClass": "exec::scan", "desc": "open",
         "exceptionClass": "io", "message": "disk gone", "nSkip": 1, "nFire": 2},
        {"type": "pause", "siteClass": "exec::work", "desc": "setup",
         "address": "10.0.0.5", "port": 31010},
        {"type": "pause", "siteClass": "exec::work", "desc": "flush", "pauseMillis": 25},
        {"type": "latch", "siteClass": "exec::sort", "desc": "spill", "count": 2}
    ]}"#;

    #[test]
    fn parse_reads_every_kind() {
        let document = ControlsDocument::parse(SAMPLE).unwrap();
        assert_eq!(document.len(), 4);

        let exception = &document.injections[0];
        assert_eq!(exception.skip, 1);
        assert_eq!(exception.fire, 2);
        assert_eq!(
            exception.kind,
            InjectionKind::Exception {
                class: FaultClass::Io,
                message: Some("disk gone".to_string()),
            }
        );

        let pause = &document.injections[1];
        assert_eq!(pause.address.as_deref(), Some("10.0.0.5"));
        assert_eq!(pause.port, Some(31010));
        assert_eq!(pause.fire, 1);
        assert_eq!(pause.kind, InjectionKind::Pause { millis: None });

        assert_eq!(
            document.injections[2].kind,
            InjectionKind::Pause { millis: Some(25) }
        );
        assert_eq!(
            document.injections[3].kind,
            InjectionKind::Latch { count: 2 }
        );
    }

    #[test]
    fn blank_document_is_empty() {
        assert!(ControlsDocument::parse("").unwrap().is_empty());
        assert!(ControlsDocument::parse("  \n").unwrap().is_empty());
        assert!(ControlsDocument::parse("{}").unwrap().is_empty());
    }

    #[test]
    fn latch_count_defaults_to_one() {
        let json = r#"{"injections":[{"type":"latch","siteClass":"a","desc":"b"}]}"#;
        let document = ControlsDocument::parse(json).unwrap();
        assert_eq!(document.injections[0].kind, InjectionKind::Latch { count: 1 });
    }

    #[test]
    fn unknown_type_is_parse_error() {
        let json = r#"{"injections":[{"type":"explode","siteClass":"a","desc":"b"}]}"#;
        assert!(matches!(
            ControlsDocument::parse(json),
            Err(ControlsError::Parse(_))
        ));
    }

    #[test]
    fn unknown_fault_class_is_parse_error() {
        let json = r#"{"injections":[{"type":"exception","siteClass":"a","desc":"b","exceptionClass":"segfault"}]}"#;
        assert!(ControlsDocument::parse(json).is_err());
    }

    #[test]
    fn zero_fire_is_rejected() {
        let json = r#"{"injections":[{"type":"exception","siteClass":"a","desc":"b","exceptionClass":"runtime","nFire":0}]}"#;
        let err = ControlsDocument::parse(json).unwrap_err();
        assert!(matches!(
            err,
            ControlsError::Invalid(DomainError::InvalidSchedule { .. })
        ));
    }

    #[test]
    fn scheduled_latch_is_rejected() {
        let json = r#"{"injections":[{"type":"latch","siteClass":"a","desc":"b","nSkip":3}]}"#;
        assert!(matches!(
            ControlsDocument::parse(json),
            Err(ControlsError::Invalid(DomainError::InvalidSchedule { .. }))
        ));
    }

    #[test]
    fn blank_site_is_rejected() {
        let json = r#"{"injections":[{"type":"pause","siteClass":" ","desc":"b"}]}"#;
        assert!(matches!(
            ControlsDocument::parse(json),
            Err(ControlsError::Invalid(DomainError::InvalidSiteClass(_)))
        ));
        let json = r#"{"injections":[{"type":"pause","siteClass":"a","desc":""}]}"#;
        assert!(matches!(
            ControlsDocument::parse(json),
            Err(ControlsError::Invalid(DomainError::InvalidDescription { .. }))
        ));
    }

    #[test]
    fn port_without_address_is_rejected() {
        let json = r#"{"injections":[{"type":"pause","siteClass":"a","desc":"b","port":1}]}"#;
        assert!(matches!(
            ControlsDocument::parse(json),
            Err(ControlsError::Invalid(DomainError::InvalidEndpoint(_)))
        ));
    }

    #[test]
    fn to_json_omits_defaults_and_parses_back() {
        let document = ControlsDocument::parse(SAMPLE).unwrap();
        let json = document.to_json().unwrap();
        assert!(json.contains(r#""type":"exception""#));
        assert!(json.contains(r#""exceptionClass":"io""#));
        assert!(!json.contains(r#""nFire":1"#));
        assert_eq!(ControlsDocument::parse(&json).unwrap(), document);
    }

    #[test]
    fn from_file_reports_missing_path() {
        let err = ControlsDocument::from_file("/nonexistent/controls.json").unwrap_err();
        assert!(matches!(err, ControlsError::Io { .. }));
    }
}
